//! Configuration management

use crate::service::{DeletePolicy, DeleteRules};
use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Per-relationship delete policies
    pub delete_rules: DeleteRules,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            delete_rules: delete_rules_from_env(),
        })
    }

    /// Get the HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Read per-relationship delete policies, falling back to the defaults.
/// Accepted values are "restrict" and "cascade" (case-insensitive).
fn delete_rules_from_env() -> DeleteRules {
    let defaults = DeleteRules::default();
    DeleteRules {
        country_states: policy_var("DELETE_POLICY_COUNTRY_STATES", defaults.country_states),
        state_cities: policy_var("DELETE_POLICY_STATE_CITIES", defaults.state_cities),
        city_properties: policy_var("DELETE_POLICY_CITY_PROPERTIES", defaults.city_properties),
        city_projects: policy_var("DELETE_POLICY_CITY_PROJECTS", defaults.city_projects),
        developer_projects: policy_var(
            "DELETE_POLICY_DEVELOPER_PROJECTS",
            defaults.developer_projects,
        ),
        user_properties: policy_var("DELETE_POLICY_USER_PROPERTIES", defaults.user_properties),
        user_projects: policy_var("DELETE_POLICY_USER_PROJECTS", defaults.user_projects),
        project_properties: policy_var(
            "DELETE_POLICY_PROJECT_PROPERTIES",
            defaults.project_properties,
        ),
        property_images: policy_var("DELETE_POLICY_PROPERTY_IMAGES", defaults.property_images),
    }
}

fn policy_var(key: &str, default: DeletePolicy) -> DeletePolicy {
    match env::var(key) {
        Ok(value) => match value.to_lowercase().as_str() {
            "cascade" => DeletePolicy::Cascade,
            "restrict" => DeletePolicy::Restrict,
            _ => default,
        },
        Err(_) => default,
    }
}
