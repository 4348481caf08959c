use std::fmt;

use chrono::NaiveDate;
use hashbrown::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    entry::WorkoutEntry,
    persist::{self, KeyValueStore, MemoryKv, PersistError},
    types::{DEFAULT_STORAGE_KEY, EntryId, ExerciseId},
};

use super::indices::{VecIndex, remove_from_vec_index};

/// Errors returned by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entry has the given id.
    #[error("no workout entry with id {0}")]
    MissingEntry(EntryId),
    /// The in-memory change was applied but the flush failed.
    #[error("failed to persist workouts: {0}")]
    Persist(#[from] PersistError),
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the full collection is written under.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// What an [`EntryStore::upsert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new entry was appended.
    Inserted,
    /// An entry with the same id was replaced in place.
    Replaced,
}

/// Authoritative in-memory collection of workout entries.
///
/// Every successful mutation writes the whole collection to the key-value
/// collaborator under [`StoreConfig::storage_key`].
pub struct EntryStore {
    records: HashMap<EntryId, WorkoutEntry>,
    order: Vec<EntryId>,
    pos: HashMap<EntryId, usize>,
    by_date: VecIndex<NaiveDate>,
    by_exercise: VecIndex<ExerciseId>,
    kv: Box<dyn KeyValueStore>,
    config: StoreConfig,
}

impl fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryStore")
            .field("len", &self.order.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EntryStore {
    /// Creates an empty store without reading `kv`.
    pub fn new(kv: Box<dyn KeyValueStore>, config: StoreConfig) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            pos: HashMap::new(),
            by_date: VecIndex::new(),
            by_exercise: VecIndex::new(),
            kv,
            config,
        }
    }

    /// Creates an empty store backed by a fresh [`MemoryKv`].
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryKv::new()), StoreConfig::default())
    }

    /// Loads the stored collection from `kv`.
    ///
    /// Never fails: unreadable data is logged and the store starts empty.
    pub fn load(kv: Box<dyn KeyValueStore>, config: StoreConfig) -> Self {
        let entries = persist::load_entries(&*kv, &config.storage_key);
        let mut store = Self::new(kv, config);
        for entry in entries {
            if store.apply_upsert(entry) == UpsertOutcome::Replaced {
                debug!("duplicate entry id in stored data, kept the later record");
            }
        }
        store
    }

    /// Store settings.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks up one entry by id.
    pub fn get(&self, id: &str) -> Option<&WorkoutEntry> {
        self.records.get(id)
    }

    /// Clones one entry by id.
    pub fn get_cloned(&self, id: &str) -> Option<WorkoutEntry> {
        self.get(id).cloned()
    }

    /// All entries in collection order.
    pub fn entries(&self) -> Vec<&WorkoutEntry> {
        self.order.iter().filter_map(|id| self.records.get(id)).collect()
    }

    /// Clones all entries in collection order.
    pub fn entries_cloned(&self) -> Vec<WorkoutEntry> {
        self.entries().into_iter().cloned().collect()
    }

    /// Entries whose date equals `date`, in collection order.
    pub fn entries_on(&self, date: NaiveDate) -> Vec<&WorkoutEntry> {
        self.bucket(self.by_date.get(&date))
    }

    /// Clones the entries on `date`.
    pub fn entries_on_cloned(&self, date: NaiveDate) -> Vec<WorkoutEntry> {
        self.entries_on(date).into_iter().cloned().collect()
    }

    /// Entries for `exercise_id`, in collection order.
    pub fn by_exercise(&self, exercise_id: &str) -> Vec<&WorkoutEntry> {
        self.bucket(self.by_exercise.get(exercise_id))
    }

    /// Position of `id` in collection order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.pos.get(id).copied()
    }

    /// Creates or replaces `entry` by id, then flushes the full collection.
    pub fn upsert(&mut self, entry: WorkoutEntry) -> Result<UpsertOutcome, StoreError> {
        let id = entry.id.clone();
        let sets = entry.sets.len();
        let outcome = self.apply_upsert(entry);
        debug!(%id, sets, ?outcome, "upserted workout entry");
        self.flush()?;
        Ok(outcome)
    }

    /// Removes one entry by id, then flushes the full collection.
    pub fn remove(&mut self, id: &str) -> Result<WorkoutEntry, StoreError> {
        let removed = self
            .records
            .remove(id)
            .ok_or_else(|| StoreError::MissingEntry(id.to_string()))?;

        if let Some(idx) = self.pos.remove(id) {
            self.order.remove(idx);
            for (i, later) in self.order.iter().enumerate().skip(idx) {
                self.pos.insert(later.clone(), i);
            }
        }
        if let Some(bucket) = self.by_date.get_mut(&removed.date) {
            remove_from_vec_index(bucket, id);
        }
        if let Some(bucket) = self.by_exercise.get_mut(&removed.exercise_id) {
            remove_from_vec_index(bucket, id);
        }

        debug!(%id, "removed workout entry");
        self.flush()?;
        Ok(removed)
    }

    /// Writes the full collection to the key-value collaborator.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let payload = self.export_json()?;
        self.kv.set(&self.config.storage_key, &payload)?;
        Ok(())
    }

    /// Serializes the full collection in collection order.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(persist::encode_entries(self.entries())?)
    }

    fn bucket(&self, ids: Option<&Vec<EntryId>>) -> Vec<&WorkoutEntry> {
        ids.into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    fn apply_upsert(&mut self, entry: WorkoutEntry) -> UpsertOutcome {
        let id = entry.id.clone();
        let outcome = match self.records.get(&id) {
            Some(old) => {
                if old.date != entry.date {
                    if let Some(bucket) = self.by_date.get_mut(&old.date) {
                        remove_from_vec_index(bucket, &id);
                    }
                    insert_in_order(self.by_date.entry(entry.date).or_default(), &id, &self.pos);
                }
                if old.exercise_id != entry.exercise_id {
                    if let Some(bucket) = self.by_exercise.get_mut(&old.exercise_id) {
                        remove_from_vec_index(bucket, &id);
                    }
                    insert_in_order(
                        self.by_exercise.entry(entry.exercise_id.clone()).or_default(),
                        &id,
                        &self.pos,
                    );
                }
                UpsertOutcome::Replaced
            }
            None => {
                self.pos.insert(id.clone(), self.order.len());
                self.order.push(id.clone());
                self.by_date.entry(entry.date).or_default().push(id.clone());
                self.by_exercise
                    .entry(entry.exercise_id.clone())
                    .or_default()
                    .push(id.clone());
                UpsertOutcome::Inserted
            }
        };
        self.records.insert(id, entry);
        outcome
    }
}

// Keeps an index bucket sorted by collection position.
fn insert_in_order(bucket: &mut Vec<EntryId>, id: &str, pos: &HashMap<EntryId, usize>) {
    let at = pos.get(id).copied().unwrap_or(usize::MAX);
    let idx = bucket.partition_point(|other| pos.get(other).copied().unwrap_or(usize::MAX) < at);
    bucket.insert(idx, id.to_string());
}
