//! Projects service
//!
//! The write path is where project dates get parsed strictly: anything the
//! availability calculator would have to skip is rejected here instead.

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    availability::{self, OpenEndedPolicy},
    error::{AppError, AppResult},
    models::project::{CreateProject, EquipmentUsage, Project, ProjectQuery, UpdateProject},
    repository::{projects::ProjectDocument, Repository},
};

use super::parse_date_param;

#[derive(Clone)]
pub struct ProjectsService {
    repository: Repository,
    policy: OpenEndedPolicy,
}

impl ProjectsService {
    pub fn new(repository: Repository, policy: OpenEndedPolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn list(&self, query: &ProjectQuery) -> AppResult<Vec<Project>> {
        let active_on = query
            .active_on
            .as_deref()
            .map(|raw| parse_date_param(raw, "active_on"))
            .transpose()?;

        let projects = self.repository.projects.list().await?;
        Ok(projects
            .into_iter()
            .filter(|project| matches_query(project, active_on, query.equipment_id.as_deref(), self.policy))
            .collect())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Project> {
        self.repository.projects.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        data.validate()?;
        let doc = build_document(data)?;
        self.check_equipment_exists(&data.equipment_usage).await?;

        let id = Uuid::new_v4().to_string();
        let project = self.repository.projects.create(&id, &doc).await?;
        tracing::info!(
            "Created project {} ({}) reserving {} equipment item(s)",
            project.id,
            project.name,
            project.equipment_usage.len()
        );
        Ok(project)
    }

    pub async fn update(&self, id: &str, data: &UpdateProject) -> AppResult<Project> {
        data.validate()?;
        let current = self.repository.projects.get_by_id(id).await?;
        let merged = merge_update(&current, data);
        let doc = build_document(&merged)?;
        if data.equipment_usage.is_some() {
            self.check_equipment_exists(&merged.equipment_usage).await?;
        }

        let project = self.repository.projects.replace(id, &doc).await?;
        tracing::info!("Updated project {}", id);
        Ok(project)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.projects.delete(id).await?;
        tracing::info!("Deleted project {}", id);
        Ok(())
    }

    async fn check_equipment_exists(&self, usage: &[EquipmentUsage]) -> AppResult<()> {
        if usage.is_empty() {
            return Ok(());
        }

        let ids: Vec<String> = usage.iter().map(|u| u.equipment_id.clone()).collect();
        let existing: HashSet<String> = self
            .repository
            .equipment
            .existing_ids(&ids)
            .await?
            .into_iter()
            .collect();

        let missing: Vec<&str> = ids
            .iter()
            .filter(|id| !existing.contains(*id))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Unknown equipment: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

/// Apply a partial update on top of the stored project
fn merge_update(current: &Project, data: &UpdateProject) -> CreateProject {
    CreateProject {
        name: data.name.clone().unwrap_or_else(|| current.name.clone()),
        client: data.client.clone().or_else(|| current.client.clone()),
        location: data.location.clone().or_else(|| current.location.clone()),
        description: data.description.clone().or_else(|| current.description.clone()),
        start_date: data
            .start_date
            .clone()
            .unwrap_or_else(|| current.start_date.to_string()),
        end_date: data
            .end_date
            .clone()
            .or_else(|| current.end_date.as_ref().map(ToString::to_string)),
        equipment_usage: data
            .equipment_usage
            .clone()
            .unwrap_or_else(|| current.equipment_usage.clone()),
    }
}

/// Validate dates and usage, and produce the normalized stored form
fn build_document(data: &CreateProject) -> AppResult<ProjectDocument> {
    let start = parse_date_param(&data.start_date, "start_date")?;
    let end = data
        .end_date
        .as_deref()
        .map(|raw| parse_date_param(raw, "end_date"))
        .transpose()?;

    if let Some(end) = end {
        if end < start {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }
    }

    check_usage(&data.equipment_usage)?;

    Ok(ProjectDocument {
        name: data.name.clone(),
        client: data.client.clone(),
        location: data.location.clone(),
        description: data.description.clone(),
        start_date: start.to_rfc3339_opts(SecondsFormat::Secs, true),
        end_date: end.map(|end| end.to_rfc3339_opts(SecondsFormat::Secs, true)),
        equipment_usage: serde_json::to_string(&data.equipment_usage)?,
    })
}

fn check_usage(usage: &[EquipmentUsage]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for entry in usage {
        if entry.equipment_id.trim().is_empty() {
            return Err(AppError::Validation("equipment_id must not be empty".to_string()));
        }
        if entry.quantity < 1 {
            return Err(AppError::Validation(format!(
                "Quantity for equipment {} must be at least 1",
                entry.equipment_id
            )));
        }
        if !seen.insert(entry.equipment_id.as_str()) {
            return Err(AppError::Validation(format!(
                "Equipment {} is listed more than once",
                entry.equipment_id
            )));
        }
    }
    Ok(())
}

fn matches_query(
    project: &Project,
    active_on: Option<DateTime<Utc>>,
    equipment_id: Option<&str>,
    policy: OpenEndedPolicy,
) -> bool {
    if let Some(equipment_id) = equipment_id {
        if !project.uses(equipment_id) {
            return false;
        }
    }
    match active_on {
        Some(reference) => availability::is_active(project, reference, policy),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::ProjectDate;

    fn create(start: &str, end: Option<&str>, usage: Vec<EquipmentUsage>) -> CreateProject {
        CreateProject {
            name: "Gala".to_string(),
            client: Some("ACME".to_string()),
            location: None,
            description: None,
            start_date: start.to_string(),
            end_date: end.map(str::to_string),
            equipment_usage: usage,
        }
    }

    #[test]
    fn test_build_document_normalizes_dates() {
        let doc = build_document(&create(
            "2024-01-01",
            Some("2024-01-10T18:00"),
            vec![EquipmentUsage::new("drill", 2)],
        ))
        .unwrap();

        assert_eq!(doc.start_date, "2024-01-01T00:00:00Z");
        assert_eq!(doc.end_date.as_deref(), Some("2024-01-10T18:00:00Z"));
        assert_eq!(doc.equipment_usage, r#"[{"equipment_id":"drill","quantity":2}]"#);
    }

    #[test]
    fn test_build_document_rejects_bad_dates() {
        let err = build_document(&create("tomorrow", None, vec![])).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("start_date")));

        let err = build_document(&create("2024-01-01", Some("later"), vec![])).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("end_date")));

        let err = build_document(&create("2024-01-10", Some("2024-01-01"), vec![])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_check_usage() {
        assert!(check_usage(&[EquipmentUsage::new("drill", 1), EquipmentUsage::new("chair", 4)]).is_ok());
        assert!(check_usage(&[EquipmentUsage::new("drill", 0)]).is_err());
        assert!(check_usage(&[EquipmentUsage::new("", 1)]).is_err());
        assert!(check_usage(&[EquipmentUsage::new("drill", 1), EquipmentUsage::new("drill", 2)]).is_err());
    }

    #[test]
    fn test_merge_update_keeps_unset_fields() {
        let current = Project::new("p1", ProjectDate::parse("2024-01-01"), None).with_usage("drill", 2);
        let update = UpdateProject {
            name: Some("Renamed".to_string()),
            client: None,
            location: None,
            description: None,
            start_date: None,
            end_date: Some("2024-01-03".to_string()),
            equipment_usage: None,
        };

        let merged = merge_update(&current, &update);
        assert_eq!(merged.name, "Renamed");
        assert_eq!(merged.start_date, "2024-01-01T00:00:00Z");
        assert_eq!(merged.end_date.as_deref(), Some("2024-01-03"));
        assert_eq!(merged.equipment_usage, vec![EquipmentUsage::new("drill", 2)]);
    }

    #[test]
    fn test_matches_query() {
        let project = Project::new(
            "p1",
            ProjectDate::parse("2024-01-01"),
            Some(ProjectDate::parse("2024-01-10")),
        )
        .with_usage("drill", 2);
        let inside = parse_date_param("2024-01-05", "active_on").unwrap();
        let outside = parse_date_param("2024-01-11", "active_on").unwrap();
        let policy = OpenEndedPolicy::SingleInstant;

        assert!(matches_query(&project, None, None, policy));
        assert!(matches_query(&project, Some(inside), Some("drill"), policy));
        assert!(!matches_query(&project, Some(outside), None, policy));
        assert!(!matches_query(&project, None, Some("chair"), policy));
    }
}
