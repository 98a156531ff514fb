//! Test harness for sessions backed by a real database file.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use canteiro::{Config, DocumentStore, Project, Session, PROJECTS_KEY};

/// Fixed edit date used by harness sessions.
pub fn harness_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

/// Owns a temp directory holding the SQLite file; dropping it removes both.
pub struct TestHarness {
    temp_dir: TempDir,
    pub db_path: PathBuf,
    pub config: Config,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(mut config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("data").join("canteiro.db");
        config.database_path = Some(db_path.to_string_lossy().into_owned());

        Self {
            temp_dir,
            db_path,
            config,
        }
    }

    /// Opens a fresh session over the harness database.
    pub fn session(&self) -> Session {
        Session::open_with_clock(self.config.clone(), harness_today)
            .expect("Failed to open session")
    }

    pub fn store(&self) -> DocumentStore {
        DocumentStore::open(&self.config).expect("Failed to open store")
    }

    /// Writes `projects` straight to the store, bypassing any session.
    pub fn seed(&self, projects: &[Project]) {
        assert!(self.store().save(PROJECTS_KEY, projects));
    }

    pub fn stored_projects(&self) -> Vec<Project> {
        self.store().load_as_of(PROJECTS_KEY, harness_today())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
