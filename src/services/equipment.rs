//! Equipment service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let id = Uuid::new_v4().to_string();
        let equipment = self.repository.equipment.create(&id, data).await?;
        tracing::info!("Created equipment {} ({})", equipment.id, equipment.name);
        Ok(equipment)
    }

    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        self.repository.equipment.update(id, data).await
    }

    /// Delete equipment that no project references any more
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let referencing: Vec<String> = self
            .repository
            .projects
            .list()
            .await?
            .into_iter()
            .filter(|project| project.uses(id))
            .map(|project| project.id)
            .collect();

        if !referencing.is_empty() {
            return Err(AppError::Conflict(format!(
                "Equipment {} is used by project(s) {}",
                id,
                referencing.join(", ")
            )));
        }

        self.repository.equipment.delete(id).await?;
        tracing::info!("Deleted equipment {}", id);
        Ok(())
    }
}
