//! Business logic services

pub mod availability;
pub mod equipment;
pub mod projects;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    config::AvailabilityConfig,
    error::{AppError, AppResult},
    models::project::parse_date_time,
    repository::Repository,
};

/// Parse a caller-supplied date, naming the offending field on failure
pub fn parse_date_param(raw: &str, field: &str) -> AppResult<DateTime<Utc>> {
    parse_date_time(raw).ok_or_else(|| {
        AppError::Validation(format!("{} is not a valid date: {:?}", field, raw))
    })
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub equipment: equipment::EquipmentService,
    pub projects: projects::ProjectsService,
    pub availability: availability::AvailabilityService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, availability_config: AvailabilityConfig) -> Self {
        let policy = availability_config.open_ended_projects;
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            projects: projects::ProjectsService::new(repository.clone(), policy),
            availability: availability::AvailabilityService::new(Arc::new(repository.clone()), policy),
            repository,
        }
    }
}
