//! Common test utilities

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::sync::Once;

static ENV_INIT: Once = Once::new();

fn init_env() {
    ENV_INIT.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

/// Connect to the test database named by DATABASE_URL. Tests call this and
/// skip themselves when no database is reachable.
pub async fn get_test_pool() -> Result<MySqlPool, String> {
    init_env();

    let url = std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL not set".to_string())?;

    MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .map_err(|e| e.to_string())
}

/// Apply the schema migrations.
pub async fn setup_database(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Remove all rows, children before parents.
pub async fn cleanup_database(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM images").execute(pool).await?;
    sqlx::query("DELETE FROM properties").execute(pool).await?;
    sqlx::query("DELETE FROM projects").execute(pool).await?;
    sqlx::query("DELETE FROM developers").execute(pool).await?;
    sqlx::query("DELETE FROM cities").execute(pool).await?;
    sqlx::query("DELETE FROM states").execute(pool).await?;
    sqlx::query("DELETE FROM countries").execute(pool).await?;
    sqlx::query("DELETE FROM users").execute(pool).await?;
    Ok(())
}
