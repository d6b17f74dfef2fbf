//! Equipment availability calculator
//!
//! Cross-references project usage windows against owned equipment
//! quantities for a single reference date. Pure and synchronous: inputs are
//! borrowed snapshots, the result is a fresh collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{
    equipment::Equipment,
    project::{Project, ProjectDate},
};

/// How a project without an end date occupies time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OpenEndedPolicy {
    /// The window is the start instant only (end = start)
    #[default]
    SingleInstant,
    /// The window runs from the start onward, with no end
    Unbounded,
}

/// A project date that cannot be compared
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Project {project_id} has an unparsable {field} date: {raw:?}")]
pub struct InvalidProjectDate {
    pub project_id: String,
    pub field: &'static str,
    pub raw: String,
}

/// Inclusive range during which a project reserves its equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageWindow {
    pub start: DateTime<Utc>,
    /// `None` only under `OpenEndedPolicy::Unbounded`
    pub end: Option<DateTime<Utc>>,
}

impl UsageWindow {
    /// Inclusive on both ends
    pub fn contains(&self, reference: DateTime<Utc>) -> bool {
        reference >= self.start && self.end.map_or(true, |end| reference <= end)
    }
}

/// Resolve a project's usage window, rejecting unparsable dates.
pub fn usage_window(project: &Project, policy: OpenEndedPolicy) -> Result<UsageWindow, InvalidProjectDate> {
    let start = resolve(project, "start", &project.start_date)?;
    let end = match &project.end_date {
        Some(date) => Some(resolve(project, "end", date)?),
        None => match policy {
            OpenEndedPolicy::SingleInstant => Some(start),
            OpenEndedPolicy::Unbounded => None,
        },
    };
    Ok(UsageWindow { start, end })
}

fn resolve(project: &Project, field: &'static str, date: &ProjectDate) -> Result<DateTime<Utc>, InvalidProjectDate> {
    match date {
        ProjectDate::Parsed(dt) => Ok(*dt),
        ProjectDate::Unparsable(raw) => Err(InvalidProjectDate {
            project_id: project.id.clone(),
            field,
            raw: raw.clone(),
        }),
    }
}

/// Whether the project reserves its equipment at `reference`.
///
/// A project with an unparsable date is never active.
pub fn is_active(project: &Project, reference: DateTime<Utc>, policy: OpenEndedPolicy) -> bool {
    match usage_window(project, policy) {
        Ok(window) => window.contains(reference),
        Err(e) => {
            tracing::warn!("Skipping project in availability computation: {}", e);
            false
        }
    }
}

/// Availability of one equipment item at the reference date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentAvailability {
    pub equipment_id: String,
    pub name: String,
    /// Total units owned
    pub quantity: i64,
    /// Units reserved by active projects
    pub in_use: i64,
    /// `quantity - in_use`, negative when over-booked
    pub available: i64,
}

impl EquipmentAvailability {
    pub fn is_overbooked(&self) -> bool {
        self.available < 0
    }
}

/// Compute availability with the default open-ended policy.
pub fn compute_availability(
    equipment: &[Equipment],
    projects: &[Project],
    reference: DateTime<Utc>,
) -> Vec<EquipmentAvailability> {
    compute_availability_with(equipment, projects, reference, OpenEndedPolicy::default())
}

/// Compute availability of every equipment item at `reference`.
///
/// Returns one entry per equipment item, in input order. Usage entries
/// referencing unknown equipment are ignored; duplicates are summed.
pub fn compute_availability_with(
    equipment: &[Equipment],
    projects: &[Project],
    reference: DateTime<Utc>,
    policy: OpenEndedPolicy,
) -> Vec<EquipmentAvailability> {
    let active: Vec<&Project> = projects
        .iter()
        .filter(|project| is_active(project, reference, policy))
        .collect();

    equipment
        .iter()
        .map(|item| {
            let in_use: i64 = active
                .iter()
                .flat_map(|project| project.equipment_usage.iter())
                .filter(|usage| usage.equipment_id == item.id)
                .map(|usage| i64::from(usage.quantity))
                .sum();
            let quantity = i64::from(item.quantity);

            EquipmentAvailability {
                equipment_id: item.id.clone(),
                name: item.name.clone(),
                quantity,
                in_use,
                available: quantity - in_use,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn project(id: &str, start: &str, end: Option<&str>) -> Project {
        Project::new(id, ProjectDate::parse(start), end.map(ProjectDate::parse))
    }

    #[test]
    fn test_window_defaults_to_single_instant() {
        let p = project("p", "2024-02-01", None);
        let window = usage_window(&p, OpenEndedPolicy::SingleInstant).unwrap();
        assert_eq!(window.start, at(2024, 2, 1));
        assert_eq!(window.end, Some(at(2024, 2, 1)));
    }

    #[test]
    fn test_window_unbounded() {
        let p = project("p", "2024-02-01", None);
        let window = usage_window(&p, OpenEndedPolicy::Unbounded).unwrap();
        assert_eq!(window.end, None);
        assert!(window.contains(at(2030, 1, 1)));
        assert!(!window.contains(at(2024, 1, 31)));
    }

    #[test]
    fn test_window_reports_bad_field() {
        let p = project("p", "2024-02-01", Some("soon"));
        let err = usage_window(&p, OpenEndedPolicy::SingleInstant).unwrap_err();
        assert_eq!(err.field, "end");
        assert_eq!(err.raw, "soon");

        let p = project("q", "", Some("2024-02-03"));
        let err = usage_window(&p, OpenEndedPolicy::SingleInstant).unwrap_err();
        assert_eq!(err.field, "start");
        assert_eq!(err.project_id, "q");
    }

    #[test]
    fn test_bad_date_is_not_active_under_any_policy() {
        let p = project("p", "whenever", None);
        assert!(!is_active(&p, at(2024, 1, 1), OpenEndedPolicy::SingleInstant));
        assert!(!is_active(&p, at(2024, 1, 1), OpenEndedPolicy::Unbounded));
    }

    #[test]
    fn test_duplicate_usage_entries_are_summed() {
        let equipment = vec![Equipment::new("drill", "Drill", 5)];
        let projects = vec![project("p", "2024-01-01", Some("2024-01-10"))
            .with_usage("drill", 1)
            .with_usage("drill", 2)];

        let result = compute_availability(&equipment, &projects, at(2024, 1, 2));
        assert_eq!(result[0].in_use, 3);
        assert_eq!(result[0].available, 2);
    }

    #[test]
    fn test_overbooked_flag() {
        let entry = EquipmentAvailability {
            equipment_id: "chair".to_string(),
            name: "Chair".to_string(),
            quantity: 5,
            in_use: 7,
            available: -2,
        };
        assert!(entry.is_overbooked());
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(
            serde_json::to_string(&OpenEndedPolicy::SingleInstant).unwrap(),
            "\"single_instant\""
        );
        let policy: OpenEndedPolicy = serde_json::from_str("\"unbounded\"").unwrap();
        assert_eq!(policy, OpenEndedPolicy::Unbounded);
    }
}
