use chrono::NaiveDate;

use crate::entry::WorkoutEntry;

use super::store::EntryStore;

/// Finds the most recent entry for `exercise_id` dated on or before `date`.
///
/// `exclude_id` keeps an entry under edit from being its own previous
/// record. Among entries sharing the latest date, the one with the latest
/// `created_at` wins; a full tie goes to the entry later in collection
/// order.
pub fn find_previous<'a>(
    store: &'a EntryStore,
    exercise_id: &str,
    date: NaiveDate,
    exclude_id: Option<&str>,
) -> Option<&'a WorkoutEntry> {
    store
        .by_exercise(exercise_id)
        .into_iter()
        .filter(|e| e.date <= date)
        .filter(|e| exclude_id != Some(e.id.as_str()))
        // max_by keeps the last of equal elements.
        .max_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)))
}

/// Owned variant of [`find_previous`].
pub fn find_previous_cloned(
    store: &EntryStore,
    exercise_id: &str,
    date: NaiveDate,
    exclude_id: Option<&str>,
) -> Option<WorkoutEntry> {
    find_previous(store, exercise_id, date, exclude_id).cloned()
}
