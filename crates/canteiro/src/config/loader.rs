use std::path::Path;

use crate::config::schema::Config;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let alerts = &config.alerts;
    if !(alerts.reorder_ratio > 0.0 && alerts.reorder_ratio <= 1.0) {
        return Err(ConfigError::Validation {
            message: format!(
                "alerts.reorder_ratio must be in (0, 1], got {}",
                alerts.reorder_ratio
            ),
        });
    }
    if !(alerts.budget_warning_percent > 0.0 && alerts.budget_warning_percent <= 100.0) {
        return Err(ConfigError::Validation {
            message: format!(
                "alerts.budget_warning_percent must be in (0, 100], got {}",
                alerts.budget_warning_percent
            ),
        });
    }
    if alerts.delay_medium_days < 0 || alerts.delay_high_days < alerts.delay_medium_days {
        return Err(ConfigError::Validation {
            message: format!(
                "alerts.delay_high_days ({}) must be >= alerts.delay_medium_days ({}) >= 0",
                alerts.delay_high_days, alerts.delay_medium_days
            ),
        });
    }

    if config.storage.quota_bytes == 0 {
        return Err(ConfigError::Validation {
            message: "storage.quota_bytes must be greater than zero".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_from_str(r#"{ "version": "1.0" }"#).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(config.database_path.is_none());
        assert_eq!(config.storage.quota_bytes, 5 * 1024 * 1024);
        assert_eq!(config.alerts.reorder_ratio, 0.2);
        assert_eq!(config.alerts.delay_medium_days, 2);
        assert_eq!(config.alerts.delay_high_days, 5);
        assert!(!config.edits.lock_completed_projects);
    }

    #[test]
    fn test_load_full_config() {
        let config_json = r#"
        {
            "version": "1.0",
            "database_path": "/var/lib/canteiro/canteiro.db",
            "storage": { "quota_bytes": 1024 },
            "alerts": {
                "reorder_ratio": 0.25,
                "budget_warning_percent": 80,
                "delay_medium_days": 3,
                "delay_high_days": 7
            },
            "edits": { "lock_completed_projects": true }
        }
        "#;

        let config = load_config_from_str(config_json).unwrap();
        assert_eq!(
            config.database_path.as_deref(),
            Some("/var/lib/canteiro/canteiro.db")
        );
        assert_eq!(config.storage.quota_bytes, 1024);
        assert_eq!(config.alerts.reorder_ratio, 0.25);
        assert_eq!(config.alerts.budget_warning_percent, 80.0);
        assert_eq!(config.alerts.delay_high_days, 7);
        assert!(config.edits.lock_completed_projects);
    }

    #[test]
    fn test_unsupported_version() {
        let result = load_config_from_str(r#"{ "version": "2.0" }"#);
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_missing_version_fails_schema() {
        let result = load_config_from_str(r#"{ "storage": {} }"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_unknown_field_fails_schema() {
        let result = load_config_from_str(r#"{ "version": "1.0", "workers": 4 }"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_reorder_ratio_out_of_range() {
        let result =
            load_config_from_str(r#"{ "version": "1.0", "alerts": { "reorder_ratio": 1.5 } }"#);
        assert!(matches!(result, Err(ConfigError::SchemaValidation { .. })));
    }

    #[test]
    fn test_inverted_delay_thresholds() {
        let result = load_config_from_str(
            r#"{ "version": "1.0", "alerts": { "delay_medium_days": 6, "delay_high_days": 2 } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = load_config_from_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseJson(_))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/definitely/not/here/canteiro.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canteiro.json");
        std::fs::write(&path, r#"{ "version": "1.0", "database_path": "~/obras.db" }"#).unwrap();

        let config = load_config(&path).unwrap();
        let resolved = config.resolved_database_path();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolved, Some(home.join("obras.db")));
        }
    }
}
