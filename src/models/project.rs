//! Project (projet) model
//!
//! A project reserves equipment over a date range. Stored rows keep a
//! document shape: dates as text, the equipment usage list as serialized
//! JSON. [`Project`] is the parsed form.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Parse a date or date-time as found in project documents.
///
/// Accepted, in order: RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.f]]` (UTC), and
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A project date after explicit parsing.
///
/// Unparsable values are kept verbatim so they can be reported, but they
/// never take part in a date comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectDate {
    Parsed(DateTime<Utc>),
    Unparsable(String),
}

impl ProjectDate {
    pub fn parse(raw: &str) -> Self {
        match parse_date_time(raw) {
            Some(dt) => ProjectDate::Parsed(dt),
            None => ProjectDate::Unparsable(raw.to_string()),
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            ProjectDate::Parsed(dt) => Some(*dt),
            ProjectDate::Unparsable(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for ProjectDate {
    fn from(dt: DateTime<Utc>) -> Self {
        ProjectDate::Parsed(dt)
    }
}

impl fmt::Display for ProjectDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectDate::Parsed(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ProjectDate::Unparsable(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for ProjectDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProjectDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProjectDate::parse(&raw))
    }
}

/// Quantity of one equipment item reserved by a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentUsage {
    pub equipment_id: String,
    /// Units reserved (positive)
    pub quantity: i32,
}

impl EquipmentUsage {
    pub fn new(equipment_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            quantity,
        }
    }
}

/// Project with parsed dates and usage list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Start of the usage window
    #[schema(value_type = String)]
    pub start_date: ProjectDate,
    /// End of the usage window (absent: see `OpenEndedPolicy`)
    #[schema(value_type = Option<String>)]
    pub end_date: Option<ProjectDate>,
    /// Equipment reserved, in entry order
    pub equipment_usage: Vec<EquipmentUsage>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Project {
    /// Bare project with only the fields the availability calculator reads.
    pub fn new(id: impl Into<String>, start_date: ProjectDate, end_date: Option<ProjectDate>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            client: None,
            location: None,
            description: None,
            start_date,
            end_date,
            equipment_usage: Vec::new(),
            crea_date: None,
            modif_date: None,
        }
    }

    pub fn with_usage(mut self, equipment_id: impl Into<String>, quantity: i32) -> Self {
        self.equipment_usage.push(EquipmentUsage::new(equipment_id, quantity));
        self
    }

    /// Whether the usage list mentions the given equipment
    pub fn uses(&self, equipment_id: &str) -> bool {
        self.equipment_usage
            .iter()
            .any(|usage| usage.equipment_id == equipment_id)
    }
}

/// Stored project row (document shape)
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub client: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    /// JSON array of `EquipmentUsage`
    pub equipment_usage: String,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        let equipment_usage = serde_json::from_str::<Vec<EquipmentUsage>>(&record.equipment_usage)
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Project {} has an unreadable equipment usage list, treating it as empty: {}",
                    record.id,
                    e
                );
                Vec::new()
            });

        Project {
            start_date: ProjectDate::parse(&record.start_date),
            end_date: record.end_date.as_deref().map(ProjectDate::parse),
            id: record.id,
            name: record.name,
            client: record.client,
            location: record.location,
            description: record.description,
            equipment_usage,
            crea_date: record.crea_date,
            modif_date: record.modif_date,
        }
    }
}

/// Create project request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub client: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Start date (RFC 3339, YYYY-MM-DDTHH:MM or YYYY-MM-DD)
    pub start_date: String,
    /// End date, same formats as `start_date`
    pub end_date: Option<String>,
    #[serde(default)]
    pub equipment_usage: Vec<EquipmentUsage>,
}

/// Update project request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Replaces the whole usage list when present
    pub equipment_usage: Option<Vec<EquipmentUsage>>,
}

/// Query parameters for project listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ProjectQuery {
    /// Only projects whose usage window contains this date
    pub active_on: Option<String>,
    /// Only projects reserving this equipment
    pub equipment_id: Option<String>,
}
