//! Local document store.
//!
//! Each logical collection is one JSON array kept in a single SQLite row.
//! There is at most one writer and the last write wins.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

pub mod collection;
pub mod documents;
pub mod error;
pub mod migrations;
pub mod repository;

pub use collection::{
    quarantine_key, DocumentStore, LEGACY_KEYS, MATERIALS_KEY, PROJECTS_KEY, VISITS_KEY,
};
pub use documents::CURRENT_DOCUMENT_VERSION;
pub use error::StoreError;
pub use repository::ProjectRepository;

/// Shared SQLite connection behind the collection store. Clones share it.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens the database file, creating its directory and the collections
    /// table as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        log::info!("Document store at {}", path.display());
        Self::prepared(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::prepared(Connection::open_in_memory()?)
    }

    fn prepared(conn: Connection) -> Result<Self, StoreError> {
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&conn)
    }
}

/// `~/.canteiro/data/canteiro.db`, when the home directory is known.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".canteiro").join("data").join("canteiro.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_parent_and_collections_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obras").join("canteiro.db");
        let db = Database::open(&path).unwrap();
        assert!(path.exists());

        let tables: u32 = db
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'collections'",
                    [],
                    |r| r.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_reopening_a_file_keeps_its_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canteiro.db");
        Database::open(&path)
            .unwrap()
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO collections (key, schema_version, payload, updated_at)
                     VALUES ('projects', 1, '[]', '2024-06-15T00:00:00Z')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let rows: u32 = Database::open(&path)
            .unwrap()
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM collections", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_default_database_path() {
        let path = default_database_path().unwrap();
        assert!(path.ends_with(".canteiro/data/canteiro.db"));
    }
}
