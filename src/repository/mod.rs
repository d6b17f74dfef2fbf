//! Repository layer for database operations

pub mod equipment;
pub mod projects;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{equipment::Equipment, project::Project},
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub projects: projects::ProjectsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            projects: projects::ProjectsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Read access to the current equipment and project collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventorySnapshot {
    async fn equipment_snapshot(&self) -> AppResult<Vec<Equipment>>;

    async fn project_snapshot(&self) -> AppResult<Vec<Project>>;
}

#[async_trait]
impl InventorySnapshot for Repository {
    async fn equipment_snapshot(&self) -> AppResult<Vec<Equipment>> {
        self.equipment.list().await
    }

    async fn project_snapshot(&self) -> AppResult<Vec<Project>> {
        self.projects.list().await
    }
}
