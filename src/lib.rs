//! T~T Stock
//!
//! Equipment inventory and project server: a REST JSON API over the
//! equipment catalog and the projects that reserve it, with an
//! availability calculator cross-referencing the two.

use std::sync::Arc;

pub mod api;
pub mod availability;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use availability::{compute_availability, compute_availability_with, EquipmentAvailability, OpenEndedPolicy};
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
