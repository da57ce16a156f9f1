//! Fingerprint persistence.
//!
//! Sync writes fingerprints into a store; the metadata shell reads them back
//! to hydrate field snapshots before assembly. Two stores are provided:
//!
//! - [`InMemoryFingerprintStore`] - concurrent map, for tests and
//!   long-running processes that share one store between threads.
//! - [`SqliteFingerprintStore`] - persistent, at `~/.sextant/fingerprints.db`
//!   by default. The store records the fingerprint format version it was
//!   written with and clears itself when opened by a newer format.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use rusqlite::{params, Connection, OptionalExtension};

use super::version::CURRENT_FINGERPRINT_VERSION;
use super::Fingerprint;
use crate::model::{Field, FieldId};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to determine store directory")]
    NoStoreDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A fingerprint together with the format version it was computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFingerprint {
    pub fingerprint: Fingerprint,
    pub version: i32,
}

/// Storage for per-field fingerprints.
pub trait FingerprintStore {
    fn get(&self, field_id: FieldId) -> StoreResult<Option<StoredFingerprint>>;

    fn put(&self, field_id: FieldId, fingerprint: &Fingerprint, version: i32) -> StoreResult<()>;

    /// Remove a fingerprint. Returns whether one was stored.
    fn remove(&self, field_id: FieldId) -> StoreResult<bool>;

    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Fill `fingerprint` / `fingerprint_version` of each field from a store.
///
/// Fields without a stored fingerprint are left untouched. Returns the
/// number of fields hydrated.
pub fn hydrate(fields: &mut [Field], store: &dyn FingerprintStore) -> StoreResult<usize> {
    let mut hydrated = 0;
    for field in fields.iter_mut() {
        if let Some(stored) = store.get(field.id)? {
            field.fingerprint = Some(stored.fingerprint);
            field.fingerprint_version = stored.version;
            hydrated += 1;
        }
    }
    tracing::debug!(hydrated, total = fields.len(), "hydrated field fingerprints");
    Ok(hydrated)
}

// ============================================================================
// In-memory store
// ============================================================================

/// Concurrent in-memory fingerprint store.
#[derive(Debug, Default)]
pub struct InMemoryFingerprintStore {
    entries: DashMap<FieldId, StoredFingerprint>,
}

impl InMemoryFingerprintStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FingerprintStore for InMemoryFingerprintStore {
    fn get(&self, field_id: FieldId) -> StoreResult<Option<StoredFingerprint>> {
        Ok(self.entries.get(&field_id).map(|entry| entry.value().clone()))
    }

    fn put(&self, field_id: FieldId, fingerprint: &Fingerprint, version: i32) -> StoreResult<()> {
        self.entries.insert(
            field_id,
            StoredFingerprint {
                fingerprint: fingerprint.clone(),
                version,
            },
        );
        Ok(())
    }

    fn remove(&self, field_id: FieldId) -> StoreResult<bool> {
        Ok(self.entries.remove(&field_id).is_some())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.entries.len())
    }
}

// ============================================================================
// SQLite store
// ============================================================================

/// SQLite-backed fingerprint store.
pub struct SqliteFingerprintStore {
    conn: Connection,
}

impl SqliteFingerprintStore {
    /// Open or create the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Open the store at its default location.
    pub fn open_default() -> StoreResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// `~/.sextant/fingerprints.db`
    pub fn default_path() -> StoreResult<PathBuf> {
        let base = dirs::home_dir().ok_or(StoreError::NoStoreDir)?;
        Ok(base.join(".sextant").join("fingerprints.db"))
    }

    fn init(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS fingerprints (
                field_id INTEGER PRIMARY KEY,
                version INTEGER NOT NULL,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        let stored_version: Option<i32> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'fingerprint_version'",
                [],
                |row| {
                    let s: String = row.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .optional()?;

        match stored_version {
            Some(v) if v == CURRENT_FINGERPRINT_VERSION => {}
            Some(v) => {
                tracing::warn!(
                    stored = v,
                    current = CURRENT_FINGERPRINT_VERSION,
                    "fingerprint format changed, clearing store"
                );
                self.clear()?;
                self.set_version()?;
            }
            None => self.set_version()?,
        }

        Ok(())
    }

    fn set_version(&self) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('fingerprint_version', ?)",
            params![CURRENT_FINGERPRINT_VERSION.to_string()],
        )?;
        Ok(())
    }

    /// Delete every stored fingerprint.
    pub fn clear(&self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM fingerprints", [])?;
        Ok(())
    }

    /// Field ids with fingerprints older than `version`.
    pub fn older_than(&self, version: i32) -> StoreResult<Vec<FieldId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT field_id FROM fingerprints WHERE version < ? ORDER BY field_id")?;
        let ids = stmt
            .query_map(params![version], |row| row.get(0))?
            .collect::<Result<Vec<FieldId>, _>>()?;
        Ok(ids)
    }
}

impl FingerprintStore for SqliteFingerprintStore {
    fn get(&self, field_id: FieldId) -> StoreResult<Option<StoredFingerprint>> {
        let row: Option<(i32, String)> = self
            .conn
            .query_row(
                "SELECT version, value FROM fingerprints WHERE field_id = ?",
                params![field_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((version, json)) => Ok(Some(StoredFingerprint {
                fingerprint: serde_json::from_str(&json)?,
                version,
            })),
            None => Ok(None),
        }
    }

    fn put(&self, field_id: FieldId, fingerprint: &Fingerprint, version: i32) -> StoreResult<()> {
        let json = serde_json::to_string(fingerprint)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO fingerprints (field_id, version, value) VALUES (?, ?, ?)",
            params![field_id, version, json],
        )?;
        Ok(())
    }

    fn remove(&self, field_id: FieldId) -> StoreResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM fingerprints WHERE field_id = ?", params![field_id])?;
        Ok(rows > 0)
    }

    fn len(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM fingerprints", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
