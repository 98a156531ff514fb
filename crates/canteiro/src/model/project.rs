use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::{DocumentCategory, EntityId, Material, Milestone, Phase, Photo, Task, Visit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    #[default]
    Residential,
    Commercial,
    Industrial,
    Mixed,
}

/// Any status may follow any other; see [`crate::mutation::EditPolicy`] for
/// the optional lock on completed projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::OnHold => "on_hold",
            ProjectStatus::Completed => "completed",
        }
    }
}

/// A construction site ("obra") and everything it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub construction_type: ConstructionType,
    pub responsible_engineer: String,
    pub status: ProjectStatus,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de::number")]
    pub total_area: f64,
    #[serde(deserialize_with = "de::count")]
    pub number_of_units: u32,
    #[serde(deserialize_with = "de::number")]
    pub budget: f64,
    #[serde(deserialize_with = "de::number")]
    pub spent: f64,
    pub description: String,
    pub materials: Vec<Material>,
    pub timeline: Vec<Phase>,
    pub visits: Vec<Visit>,
    pub documents: Vec<DocumentCategory>,
    pub photos: Vec<Photo>,
    /// User-entered materials budget, independent of the planned material value.
    #[serde(
        deserialize_with = "de::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub materials_budget: Option<f64>,
}

impl Project {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn material(&self, id: EntityId) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn phase(&self, id: EntityId) -> Option<&Phase> {
        self.timeline.iter().find(|p| p.id == id)
    }

    pub fn visit(&self, id: EntityId) -> Option<&Visit> {
        self.visits.iter().find(|v| v.id == id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.timeline.iter().flat_map(|phase| phase.tasks.iter())
    }

    pub fn milestones(&self) -> impl Iterator<Item = &Milestone> {
        self.timeline.iter().flat_map(|phase| phase.milestones.iter())
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProjectStatus::Completed
    }
}
