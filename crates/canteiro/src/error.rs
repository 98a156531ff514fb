use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::EntityId;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CanteiroError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

/// Rejection of an edit payload. The project list the edit was applied to
/// is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("{field} must be between 0 and 100 (got {value})")]
    InvalidPercent { field: &'static str, value: f64 },

    #[error("{start_field} ({start}) must come before {end_field} ({end})")]
    DateOrder {
        start_field: &'static str,
        start: NaiveDate,
        end_field: &'static str,
        end: NaiveDate,
    },

    #[error("Project {0} is completed and locked for edits")]
    ProjectLocked(EntityId),
}

pub type Result<T> = std::result::Result<T, CanteiroError>;
