pub mod sqlite;

use std::sync::{Arc, Mutex, MutexGuard};

use hashbrown::HashMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::entry::WorkoutEntry;

/// Failures raised by a persistence collaborator or the collection codec.
#[derive(Debug, Error)]
pub enum PersistError {
    /// SQLite backend failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Collection (de)serialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Any other persistence failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Key-value collaborator holding the serialized entry collection.
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
}

#[derive(Debug, Default)]
struct MemoryKvInner {
    values: HashMap<String, String>,
    writes: usize,
}

/// In-memory [`KeyValueStore`]. Clones share the same backing map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    inner: Arc<Mutex<MemoryKvInner>>,
}

impl MemoryKv {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one key.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let kv = Self::new();
        kv.lock().values.insert(key.to_string(), value.into());
        kv
    }

    /// Number of `set` calls observed so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Raw value under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryKvInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut inner = self.lock();
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

/// Serializes the full collection in order.
pub fn encode_entries<'a>(entries: impl IntoIterator<Item = &'a WorkoutEntry>) -> PersistResult<String> {
    let entries: Vec<&WorkoutEntry> = entries.into_iter().collect();
    Ok(serde_json::to_string(&entries)?)
}

/// Parses a serialized collection.
///
/// Only a payload that is not an entry array fails as a whole. Entries that
/// parse but break a set invariant are dropped one by one and logged.
pub fn decode_entries(payload: &str) -> PersistResult<Vec<WorkoutEntry>> {
    let entries: Vec<WorkoutEntry> = serde_json::from_str(payload)?;
    Ok(entries
        .into_iter()
        .filter(|entry| match entry.validate() {
            Ok(()) => true,
            Err(reason) => {
                warn!(id = %entry.id, %reason, "dropping invalid stored workout");
                false
            }
        })
        .collect())
}

/// Reads the collection stored under `key`.
///
/// Missing data yields an empty collection. Unreadable or malformed data
/// is logged and also yields an empty collection.
pub fn load_entries(kv: &dyn KeyValueStore, key: &str) -> Vec<WorkoutEntry> {
    let payload = match kv.get(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(%key, error = %err, "failed to read stored workouts, starting empty");
            return Vec::new();
        }
    };

    match decode_entries(&payload) {
        Ok(entries) => {
            info!(%key, count = entries.len(), "loaded stored workouts");
            entries
        }
        Err(err) => {
            warn!(%key, error = %err, "failed to parse stored workouts, starting empty");
            Vec::new()
        }
    }
}
