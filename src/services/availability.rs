//! Availability service

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    availability::{compute_availability_with, EquipmentAvailability, OpenEndedPolicy},
    error::{AppError, AppResult},
    repository::InventorySnapshot,
};

#[derive(Clone)]
pub struct AvailabilityService {
    source: Arc<dyn InventorySnapshot + Send + Sync>,
    policy: OpenEndedPolicy,
}

impl AvailabilityService {
    pub fn new(source: Arc<dyn InventorySnapshot + Send + Sync>, policy: OpenEndedPolicy) -> Self {
        Self { source, policy }
    }

    /// Availability of every equipment item at `reference`
    pub async fn availability_at(
        &self,
        reference: DateTime<Utc>,
        overbooked_only: bool,
    ) -> AppResult<Vec<EquipmentAvailability>> {
        let equipment = self.source.equipment_snapshot().await?;
        let projects = self.source.project_snapshot().await?;

        let mut result = compute_availability_with(&equipment, &projects, reference, self.policy);
        if overbooked_only {
            result.retain(EquipmentAvailability::is_overbooked);
        }

        tracing::debug!(
            "Computed availability at {} over {} equipment item(s) and {} project(s), {} entries returned",
            reference,
            equipment.len(),
            projects.len(),
            result.len()
        );
        Ok(result)
    }

    /// Availability at a project's start, for the equipment it reserves
    pub async fn project_availability(&self, project_id: &str) -> AppResult<Vec<EquipmentAvailability>> {
        let equipment = self.source.equipment_snapshot().await?;
        let projects = self.source.project_snapshot().await?;

        let project = projects
            .iter()
            .find(|project| project.id == project_id)
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project_id)))?;
        let start = project.start_date.as_datetime().ok_or_else(|| {
            AppError::BusinessRule(format!(
                "Project {} has an unparsable start date: {}",
                project_id, project.start_date
            ))
        })?;

        let mut result = compute_availability_with(&equipment, &projects, start, self.policy);
        result.retain(|entry| project.uses(&entry.equipment_id));
        Ok(result)
    }
}
