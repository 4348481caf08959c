//! Shared primitive IDs and form constants.

/// Unique workout entry identifier.
pub type EntryId = String;
/// Catalog body-part identifier.
pub type BodyPartId = String;
/// Catalog exercise identifier.
pub type ExerciseId = String;
/// 1-based position of a set within the edit form.
pub type SetNumber = u8;

/// Number of fixed set slots in the edit form.
pub const SLOT_COUNT: usize = 5;

/// Storage key under which the full entry collection is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "workout_app_v3";
