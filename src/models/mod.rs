//! Data models for T~T Stock

pub mod equipment;
pub mod project;

// Re-export commonly used types
pub use equipment::Equipment;
pub use project::{EquipmentUsage, Project, ProjectDate};
