//! Turns the fixed edit-form slots into a stored workout entry.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::{
    core::store::{EntryStore, StoreError},
    entry::{SetRecord, WorkoutEntry},
    types::{BodyPartId, EntryId, ExerciseId, SLOT_COUNT, SetNumber},
};

/// Raw text of one edit-form slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetInput {
    /// Weight as typed.
    pub weight: String,
    /// Reps as typed.
    pub reps: String,
    /// Memo as typed.
    pub memo: String,
}

impl SetInput {
    /// Builds a slot from its three text fields.
    pub fn new(weight: impl Into<String>, reps: impl Into<String>, memo: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            reps: reps.into(),
            memo: memo.into(),
        }
    }

    fn has_weight_and_reps(&self) -> bool {
        !self.weight.trim().is_empty() && !self.reps.trim().is_empty()
    }
}

/// The five slots of the edit form, in order.
pub type SetSlots = [SetInput; SLOT_COUNT];

/// Five empty slots.
pub fn empty_slots() -> SetSlots {
    Default::default()
}

/// Where a commit lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitContext {
    /// Date being edited.
    pub date: NaiveDate,
    /// Body part of the exercise.
    pub body_part_id: BodyPartId,
    /// Exercise being edited.
    pub exercise_id: ExerciseId,
    /// Entry being re-edited; `None` creates a new entry.
    pub editing_id: Option<EntryId>,
}

/// Parses numeric text; anything unparseable counts as zero.
pub fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Converts slots into set records, dropping slots without a positive
/// weight and a positive rep count.
///
/// Kept sets retain their slot position as `set_number`, so gaps survive.
pub fn reconcile_slots(slots: &SetSlots) -> Vec<SetRecord> {
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| SetRecord {
            set_number: (i + 1) as SetNumber,
            weight: parse_amount(&slot.weight),
            reps: parse_amount(&slot.reps),
            memo: slot.memo.trim().to_string(),
        })
        .filter(|s| s.weight > 0.0 && s.reps > 0.0)
        .collect()
}

/// Refills the five slots from a stored entry for re-editing.
///
/// Slot `n` takes the set whose `set_number` is `n`; others stay empty.
pub fn slots_from_entry(entry: &WorkoutEntry) -> SetSlots {
    let mut slots = empty_slots();
    for set in &entry.sets {
        let Some(slot) = usize::from(set.set_number)
            .checked_sub(1)
            .and_then(|i| slots.get_mut(i))
        else {
            continue;
        };
        *slot = SetInput::new(set.weight.to_string(), set.reps.to_string(), set.memo.clone());
    }
    slots
}

/// Commits the slots at the current time. See [`commit_at`].
pub fn commit(
    store: &mut EntryStore,
    slots: &SetSlots,
    ctx: &CommitContext,
) -> Result<Option<WorkoutEntry>, StoreError> {
    commit_at(store, slots, ctx, Utc::now())
}

/// Validates the slots and upserts the resulting entry.
///
/// Returns `Ok(None)` without touching the store when no slot yields a
/// valid set. A re-edit keeps the edited entry's id and `created_at`; a new
/// entry gets an id built from date, exercise, and `now`, with a numeric
/// suffix when that id is already taken.
pub fn commit_at(
    store: &mut EntryStore,
    slots: &SetSlots,
    ctx: &CommitContext,
    now: DateTime<Utc>,
) -> Result<Option<WorkoutEntry>, StoreError> {
    if !slots.iter().any(SetInput::has_weight_and_reps) {
        debug!(date = %ctx.date, exercise = %ctx.exercise_id, "nothing entered, commit skipped");
        return Ok(None);
    }

    let sets = reconcile_slots(slots);
    if sets.is_empty() {
        debug!(date = %ctx.date, exercise = %ctx.exercise_id, "no valid sets, commit skipped");
        return Ok(None);
    }

    let (id, created_at) = match &ctx.editing_id {
        Some(id) => {
            let created_at = store.get(id).map_or(now, |existing| existing.created_at);
            (id.clone(), created_at)
        }
        None => (new_entry_id(store, ctx, now), now),
    };

    let entry = WorkoutEntry {
        id,
        date: ctx.date,
        body_part_id: ctx.body_part_id.clone(),
        exercise_id: ctx.exercise_id.clone(),
        sets,
        created_at,
    };
    store.upsert(entry.clone())?;
    Ok(Some(entry))
}

// Two commits for one date and exercise within the same millisecond would
// share the base id; later ones get a numeric suffix instead of replacing.
fn new_entry_id(store: &EntryStore, ctx: &CommitContext, now: DateTime<Utc>) -> EntryId {
    let base = format!("{}_{}_{}", ctx.date, ctx.exercise_id, now.timestamp_millis());
    if store.get(&base).is_none() {
        return base;
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| store.get(candidate).is_none())
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(raw: [(&str, &str, &str); SLOT_COUNT]) -> SetSlots {
        raw.map(|(w, r, m)| SetInput::new(w, r, m))
    }

    #[test]
    fn parse_amount_treats_garbage_as_zero() {
        assert_eq!(parse_amount("80"), 80.0);
        assert_eq!(parse_amount(" 82.5 "), 82.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn reconcile_keeps_slot_numbers_with_gaps() {
        let input = slots([
            ("80", "10", ""),
            ("", "", " "),
            ("85", "8", " last one "),
            ("", "", " "),
            ("", "", " "),
        ]);
        let sets = reconcile_slots(&input);
        assert_eq!(sets.len(), 2);
        assert_eq!((sets[0].set_number, sets[0].weight, sets[0].reps), (1, 80.0, 10.0));
        assert_eq!((sets[1].set_number, sets[1].weight, sets[1].reps), (3, 85.0, 8.0));
        assert_eq!(sets[1].memo, "last one");
    }

    #[test]
    fn reconcile_drops_partial_and_non_positive_slots() {
        let input = slots([
            ("80", "", ""),
            ("", "10", ""),
            ("0", "10", ""),
            ("-5", "10", ""),
            ("60", "x", ""),
        ]);
        assert!(reconcile_slots(&input).is_empty());
    }

    #[test]
    fn slots_from_entry_leaves_gaps_empty() {
        let entry = WorkoutEntry {
            id: "e".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            body_part_id: "leg".to_string(),
            exercise_id: "squat".to_string(),
            sets: vec![
                SetRecord { set_number: 1, weight: 80.0, reps: 10.0, memo: "easy".to_string() },
                SetRecord { set_number: 4, weight: 82.5, reps: 6.0, memo: String::new() },
            ],
            created_at: Utc::now(),
        };
        let slots = slots_from_entry(&entry);
        assert_eq!(slots[0], SetInput::new("80", "10", "easy"));
        assert_eq!(slots[1], SetInput::default());
        assert_eq!(slots[3], SetInput::new("82.5", "6", ""));
        assert_eq!(reconcile_slots(&slots), entry.sets);
    }
}
