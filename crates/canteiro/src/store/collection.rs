//! Whole-collection snapshots keyed by name.

use chrono::{Datelike, Local, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info_span;

use super::documents::{upgrade, MigrationContext, CURRENT_DOCUMENT_VERSION};
use super::{Database, StoreError};
use crate::config::Config;

/// The live collection: every project with everything it owns.
pub const PROJECTS_KEY: &str = "projects";
pub const MATERIALS_KEY: &str = "materials";
pub const VISITS_KEY: &str = "visits";

/// Top-level copies kept by the browser dashboard that duplicate data
/// already embedded in each project.
pub const LEGACY_KEYS: &[&str] = &[MATERIALS_KEY, VISITS_KEY];

/// Key/value store of JSON collections, one row per key.
///
/// Reads never fail from the caller's point of view: a missing, corrupt or
/// incompatible payload loads as an empty list and is logged. Every write
/// replaces the whole collection in a single statement.
#[derive(Clone)]
pub struct DocumentStore {
    db: Database,
    quota_bytes: usize,
    reorder_ratio: f64,
}

impl DocumentStore {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            quota_bytes: config.storage.quota_bytes,
            reorder_ratio: config.alerts.reorder_ratio,
        }
    }

    /// Opens the database file named by the config.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let path = config
            .resolved_database_path()
            .ok_or(StoreError::NoDatabasePath)?;
        Ok(Self::new(Database::open(&path)?, config))
    }

    pub fn open_in_memory(config: &Config) -> Result<Self, StoreError> {
        Ok(Self::new(Database::open_in_memory()?, config))
    }

    pub fn quota_bytes(&self) -> usize {
        self.quota_bytes
    }

    /// Last saved snapshot of `key`, or an empty list.
    pub fn load<T: DeserializeOwned + Serialize>(&self, key: &str) -> Vec<T> {
        self.load_as_of(key, Local::now().date_naive())
    }

    /// [`load`](Self::load) with `today` dating any legacy upgrade.
    pub fn load_as_of<T: DeserializeOwned + Serialize>(&self, key: &str, today: NaiveDate) -> Vec<T> {
        let _span = info_span!("store.load", key).entered();
        match self.try_load_as_of(key, today) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Failed to load collection '{}', using empty list: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load) but reports why a snapshot was unusable.
    pub fn try_load<T: DeserializeOwned + Serialize>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        self.try_load_as_of(key, Local::now().date_naive())
    }

    /// Loads `key`, upgrading payloads stored at an older document version.
    ///
    /// Entries that do not deserialize are skipped. Whenever anything is
    /// skipped, or the payload is unreadable as a whole, the raw payload is
    /// copied to [`quarantine_key`] first, so a later save of the surviving
    /// entries never destroys the only copy. A clean upgrade is written back
    /// at the current version.
    pub fn try_load_as_of<T: DeserializeOwned + Serialize>(
        &self,
        key: &str,
        today: NaiveDate,
    ) -> Result<Vec<T>, StoreError> {
        let Some((version, payload)) = self.read_raw(key)? else {
            log::debug!("Collection '{}' not found, starting empty", key);
            return Ok(Vec::new());
        };

        let ctx = MigrationContext {
            reorder_ratio: self.reorder_ratio,
            current_month: today.month(),
        };
        let decoded = serde_json::from_str::<Value>(&payload)
            .map_err(StoreError::from)
            .and_then(|mut value| {
                if version < CURRENT_DOCUMENT_VERSION {
                    upgrade(key, &mut value, version, &ctx);
                }
                decode_entries::<T>(key, value)
            });

        let (items, skipped) = match decoded {
            Ok(decoded) => decoded,
            Err(e) => {
                self.quarantine(key, version, &payload);
                return Err(e);
            }
        };

        if skipped > 0 {
            self.quarantine(key, version, &payload);
        } else if version < CURRENT_DOCUMENT_VERSION {
            if let Err(e) = self.try_save(key, &items) {
                log::warn!("Failed to write back upgraded collection '{}': {}", key, e);
            }
        }
        Ok(items)
    }

    /// Replaces the snapshot of `key`. Failures are logged and swallowed;
    /// returns whether the write happened.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> bool {
        match self.try_save(key, items) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save collection '{}': {}", key, e);
                false
            }
        }
    }

    pub fn try_save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let _span = info_span!("store.save", key, count = items.len()).entered();
        let payload = serde_json::to_string(items)?;
        self.write(key, &payload, CURRENT_DOCUMENT_VERSION)
    }

    /// Stores a raw payload written by the browser dashboard at version 0 so
    /// the next load upgrades it.
    pub fn import_legacy(&self, key: &str, raw_json: &str) -> Result<(), StoreError> {
        log::info!("Importing legacy collection '{}' ({} bytes)", key, raw_json.len());
        self.write(key, raw_json, 0)
    }

    /// Keeps an unreadable snapshot of `key` aside, as it was stored.
    fn quarantine(&self, key: &str, version: u32, payload: &str) {
        let target = quarantine_key(key);
        match self.write(&target, payload, version) {
            Ok(()) => log::warn!("Kept the unreadable snapshot of '{}' under '{}'", key, target),
            Err(e) => log::error!("Failed to keep a copy of '{}' under '{}': {}", key, target, e),
        }
    }

    /// Returns whether anything was stored under `key`.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.db.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM collections WHERE key = ?1", params![key])?;
            Ok(affected > 0)
        })
    }

    /// Deletes the redundant top-level `materials` and `visits` snapshots.
    /// Returns how many were present.
    pub fn drop_legacy_collections(&self) -> Result<usize, StoreError> {
        let mut dropped = 0;
        for key in LEGACY_KEYS {
            if self.remove(key)? {
                log::info!("Dropped legacy collection '{}'", key);
                dropped += 1;
            }
        }
        Ok(dropped)
    }

    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM collections ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(keys)
        })
    }

    pub fn schema_version(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.read_raw(key)?.map(|(version, _)| version))
    }

    fn read_raw(&self, key: &str) -> Result<Option<(u32, String)>, StoreError> {
        self.db.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT schema_version, payload FROM collections WHERE key = ?1",
                    params![key],
                    |r| Ok((r.get(0)?, r.get(1)?)),
                )
                .optional()?;
            Ok(row)
        })
    }

    fn write(&self, key: &str, payload: &str, version: u32) -> Result<(), StoreError> {
        if payload.len() > self.quota_bytes {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                size: payload.len(),
                quota: self.quota_bytes,
            });
        }

        let updated_at = Utc::now().to_rfc3339();
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO collections (key, schema_version, payload, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(key) DO UPDATE SET
                   schema_version = excluded.schema_version,
                   payload = excluded.payload,
                   updated_at = excluded.updated_at",
                params![key, version, payload, updated_at],
            )?;
            Ok(())
        })
    }
}

/// Where the raw payload of `key` is kept when it could not be fully read.
pub fn quarantine_key(key: &str) -> String {
    format!("{}.quarantine", key)
}

/// Deserializes a JSON array entry by entry, returning the entries that
/// parsed and how many did not.
fn decode_entries<T: DeserializeOwned>(key: &str, value: Value) -> Result<(Vec<T>, usize), StoreError> {
    let Value::Array(entries) = value else {
        return Err(StoreError::NotACollection {
            key: key.to_string(),
        });
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                log::warn!("Skipping entry {} of collection '{}': {}", index, key, e);
                skipped += 1;
            }
        }
    }
    Ok((items, skipped))
}
