//! Geography business logic (countries, states, cities)

use crate::domain::{City, Country, CreateCityInput, CreateCountryInput, CreateStateInput, State};
use crate::error::{AppError, Result};
use crate::repository::{
    CityRepository, CountryRepository, ImageRepository, ProjectRepository, PropertyRepository,
    StateRepository,
};
use crate::service::enforcement::{
    check_restrict, delete_project_tree, delete_property_tree, DeletePolicy, DeleteRules,
};
use std::sync::Arc;
use validator::Validate;

pub struct GeoService<C, S, Ci, P, J, I>
where
    C: CountryRepository,
    S: StateRepository,
    Ci: CityRepository,
    P: PropertyRepository,
    J: ProjectRepository,
    I: ImageRepository,
{
    countries: Arc<C>,
    states: Arc<S>,
    cities: Arc<Ci>,
    properties: Arc<P>,
    projects: Arc<J>,
    images: Arc<I>,
    rules: DeleteRules,
}

impl<C, S, Ci, P, J, I> GeoService<C, S, Ci, P, J, I>
where
    C: CountryRepository,
    S: StateRepository,
    Ci: CityRepository,
    P: PropertyRepository,
    J: ProjectRepository,
    I: ImageRepository,
{
    pub fn new(
        countries: Arc<C>,
        states: Arc<S>,
        cities: Arc<Ci>,
        properties: Arc<P>,
        projects: Arc<J>,
        images: Arc<I>,
        rules: DeleteRules,
    ) -> Self {
        Self {
            countries,
            states,
            cities,
            properties,
            projects,
            images,
            rules,
        }
    }

    pub async fn create_country(&self, input: CreateCountryInput) -> Result<Country> {
        input.validate()?;

        if self.countries.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::UniqueConstraintViolation {
                field: "Country.name",
            });
        }
        if self.countries.find_by_code(&input.code).await?.is_some() {
            return Err(AppError::UniqueConstraintViolation {
                field: "Country.code",
            });
        }

        self.countries.create(&input).await
    }

    pub async fn get_country(&self, id: i64) -> Result<Country> {
        self.countries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Country {} not found", id)))
    }

    pub async fn list_countries(&self, page: i64, per_page: i64) -> Result<(Vec<Country>, i64)> {
        let offset = (page - 1) * per_page;
        let countries = self.countries.list(offset, per_page).await?;
        let total = self.countries.count().await?;
        Ok((countries, total))
    }

    pub async fn create_state(&self, input: CreateStateInput) -> Result<State> {
        input.validate()?;

        if self.countries.find_by_id(input.country_id).await?.is_none() {
            return Err(AppError::ReferenceNotFound {
                entity: "Country",
                id: input.country_id,
            });
        }

        self.states.create(&input).await
    }

    pub async fn get_state(&self, id: i64) -> Result<State> {
        self.states
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("State {} not found", id)))
    }

    pub async fn list_states(&self, country_id: i64) -> Result<Vec<State>> {
        let _ = self.get_country(country_id).await?;
        self.states.list_by_country(country_id).await
    }

    pub async fn create_city(&self, input: CreateCityInput) -> Result<City> {
        input.validate()?;

        if self.states.find_by_id(input.state_id).await?.is_none() {
            return Err(AppError::ReferenceNotFound {
                entity: "State",
                id: input.state_id,
            });
        }

        self.cities.create(&input).await
    }

    pub async fn get_city(&self, id: i64) -> Result<City> {
        self.cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("City {} not found", id)))
    }

    pub async fn list_cities(&self, state_id: i64) -> Result<Vec<City>> {
        let _ = self.get_state(state_id).await?;
        self.cities.list_by_state(state_id).await
    }

    pub async fn delete_country(&self, id: i64) -> Result<()> {
        let _ = self.get_country(id).await?;

        match self.rules.country_states {
            DeletePolicy::Restrict => {
                let count = self.states.count_by_country(id).await?;
                check_restrict(self.rules.country_states, count, "Country", "State")?;
            }
            DeletePolicy::Cascade => {
                for state_id in self.states.list_ids_by_country(id).await? {
                    self.delete_state(state_id).await?;
                }
            }
        }

        self.countries.delete(id).await
    }

    pub async fn delete_state(&self, id: i64) -> Result<()> {
        let _ = self.get_state(id).await?;

        match self.rules.state_cities {
            DeletePolicy::Restrict => {
                let count = self.cities.count_by_state(id).await?;
                check_restrict(self.rules.state_cities, count, "State", "City")?;
            }
            DeletePolicy::Cascade => {
                for city_id in self.cities.list_ids_by_state(id).await? {
                    self.delete_city(city_id).await?;
                }
            }
        }

        self.states.delete(id).await
    }

    pub async fn delete_city(&self, id: i64) -> Result<()> {
        let _ = self.get_city(id).await?;

        match self.rules.city_properties {
            DeletePolicy::Restrict => {
                let count = self.properties.count_by_city(id).await?;
                check_restrict(self.rules.city_properties, count, "City", "Property")?;
            }
            DeletePolicy::Cascade => {
                for property_id in self.properties.list_ids_by_city(id).await? {
                    delete_property_tree(
                        self.properties.as_ref(),
                        self.images.as_ref(),
                        &self.rules,
                        property_id,
                    )
                    .await?;
                }
            }
        }

        match self.rules.city_projects {
            DeletePolicy::Restrict => {
                let count = self.projects.count_by_city(id).await?;
                check_restrict(self.rules.city_projects, count, "City", "Project")?;
            }
            DeletePolicy::Cascade => {
                for project_id in self.projects.list_ids_by_city(id).await? {
                    delete_project_tree(
                        self.projects.as_ref(),
                        self.properties.as_ref(),
                        self.images.as_ref(),
                        &self.rules,
                        project_id,
                    )
                    .await?;
                }
            }
        }

        self.cities.delete(id).await
    }
}
