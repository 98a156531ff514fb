use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::EntityId;

/// A dated segment of a project's timeline.
///
/// `progress` is set directly by the user and is not recomputed from the
/// tasks; [`crate::derive::phase_progress`] gives the task-based figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Phase {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    #[serde(rename = "phase")]
    pub name: String,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de::number")]
    pub progress: f64,
    pub milestones: Vec<Milestone>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestone {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    pub description: String,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    pub name: String,
    pub status: TaskStatus,
    #[serde(deserialize_with = "de::number")]
    pub progress: f64,
}
