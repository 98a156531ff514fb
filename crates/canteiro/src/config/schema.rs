use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    /// SQLite file backing the document store. A leading `~/` is expanded
    /// against the home directory; `None` falls back to
    /// [`crate::store::default_database_path`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub edits: EditsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            database_path: None,
            storage: StorageConfig::default(),
            alerts: AlertsConfig::default(),
            edits: EditsConfig::default(),
        }
    }
}

impl Config {
    pub fn resolved_database_path(&self) -> Option<PathBuf> {
        match self.database_path.as_deref() {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => crate::store::default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Largest serialized collection accepted by a single save.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

fn default_quota_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quota_bytes: default_quota_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Fraction of the planned quantity used as the default reorder threshold.
    #[serde(default = "default_reorder_ratio")]
    pub reorder_ratio: f64,
    #[serde(default = "default_budget_warning_percent")]
    pub budget_warning_percent: f64,
    #[serde(default = "default_delay_medium_days")]
    pub delay_medium_days: i64,
    #[serde(default = "default_delay_high_days")]
    pub delay_high_days: i64,
}

fn default_reorder_ratio() -> f64 {
    0.2
}

fn default_budget_warning_percent() -> f64 {
    90.0
}

fn default_delay_medium_days() -> i64 {
    2
}

fn default_delay_high_days() -> i64 {
    5
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            reorder_ratio: default_reorder_ratio(),
            budget_warning_percent: default_budget_warning_percent(),
            delay_medium_days: default_delay_medium_days(),
            delay_high_days: default_delay_high_days(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditsConfig {
    /// Reject edits to the owned collections of completed projects.
    #[serde(default)]
    pub lock_completed_projects: bool,
}
