//! Screen-flow state machine driving the engine.
//!
//! Leaving the set editor is the commit: the `EditSets -> Day` transition
//! carries the save. There is no discard transition.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::{
    calendar::{MonthGrid, YearMonth},
    commit::{self, CommitContext, SetInput, SetSlots},
    core::{
        previous::find_previous,
        store::{EntryStore, StoreError},
    },
    entry::WorkoutEntry,
    types::{BodyPartId, EntryId, ExerciseId, SLOT_COUNT},
};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Month grid.
    Calendar,
    /// Entries of one date.
    Day,
    /// Body-part and exercise picker.
    SelectExercise,
    /// Five-slot set editor.
    EditSets,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar => write!(f, "calendar"),
            Self::Day => write!(f, "day"),
            Self::SelectExercise => write!(f, "select_exercise"),
            Self::EditSets => write!(f, "edit_sets"),
        }
    }
}

/// Errors raised by session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The action is not available from the current view.
    #[error("cannot {action} from the {from} view")]
    InvalidTransition {
        /// View the action was attempted from.
        from: View,
        /// Attempted action.
        action: &'static str,
    },
    /// The referenced entry does not exist.
    #[error("no workout entry with id {0}")]
    MissingEntry(EntryId),
    /// Slot index outside `0..SLOT_COUNT`.
    #[error("slot {0} is out of range")]
    SlotOutOfRange(usize),
    /// Committing on leave failed to persist.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
struct Editing {
    body_part_id: BodyPartId,
    exercise_id: ExerciseId,
    editing_id: Option<EntryId>,
    slots: SetSlots,
}

/// One user's navigation state plus the store it edits.
#[derive(Debug)]
pub struct Session {
    store: EntryStore,
    view: View,
    month: YearMonth,
    selected: Option<NaiveDate>,
    editing: Option<Editing>,
}

impl Session {
    /// Starts on the calendar showing the month containing `today`.
    pub fn new(store: EntryStore, today: NaiveDate) -> Self {
        Self {
            store,
            view: View::Calendar,
            month: YearMonth::containing(today),
            selected: None,
            editing: None,
        }
    }

    /// Current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Month shown by the calendar.
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Grid for the visible month.
    pub fn grid(&self) -> MonthGrid {
        self.month.grid()
    }

    /// Date opened from the calendar, if any.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Gives the store back, ending the session.
    pub fn into_store(self) -> EntryStore {
        self.store
    }

    /// Entries on the selected date.
    pub fn day_entries(&self) -> Vec<&WorkoutEntry> {
        self.selected
            .map(|date| self.store.entries_on(date))
            .unwrap_or_default()
    }

    /// Current edit slots, while editing.
    pub fn slots(&self) -> Option<&SetSlots> {
        self.editing.as_ref().map(|e| &e.slots)
    }

    /// Id of the entry being re-edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().and_then(|e| e.editing_id.as_deref())
    }

    /// Latest prior entry for the exercise under edit.
    pub fn previous_record(&self) -> Option<&WorkoutEntry> {
        let editing = self.editing.as_ref()?;
        let date = self.selected?;
        find_previous(
            &self.store,
            &editing.exercise_id,
            date,
            editing.editing_id.as_deref(),
        )
    }

    /// Shows the previous month.
    pub fn prev_month(&mut self) -> Result<(), SessionError> {
        self.expect_view(View::Calendar, "change month")?;
        self.month = self.month.prev();
        Ok(())
    }

    /// Shows the next month.
    pub fn next_month(&mut self) -> Result<(), SessionError> {
        self.expect_view(View::Calendar, "change month")?;
        self.month = self.month.next();
        Ok(())
    }

    /// Opens a grid cell. Empty cells and impossible days are ignored.
    pub fn open_day(&mut self, day: Option<u32>) -> Result<(), SessionError> {
        self.expect_view(View::Calendar, "open a day")?;
        let Some(date) = day.and_then(|d| self.month.date(d)) else {
            return Ok(());
        };
        self.selected = Some(date);
        self.transition(View::Day);
        Ok(())
    }

    /// Returns from the day view to the calendar.
    pub fn back_to_calendar(&mut self) -> Result<(), SessionError> {
        self.expect_view(View::Day, "return to the calendar")?;
        self.transition(View::Calendar);
        Ok(())
    }

    /// Starts picking an exercise for a new entry.
    pub fn add_exercise(&mut self) -> Result<(), SessionError> {
        self.expect_view(View::Day, "add an exercise")?;
        self.editing = None;
        self.transition(View::SelectExercise);
        Ok(())
    }

    /// Abandons the exercise picker.
    pub fn cancel_select(&mut self) -> Result<(), SessionError> {
        self.expect_view(View::SelectExercise, "leave the exercise picker")?;
        self.transition(View::Day);
        Ok(())
    }

    /// Picks an exercise and opens empty slots for a new entry.
    pub fn select_exercise(
        &mut self,
        body_part_id: impl Into<BodyPartId>,
        exercise_id: impl Into<ExerciseId>,
    ) -> Result<(), SessionError> {
        self.expect_view(View::SelectExercise, "select an exercise")?;
        self.editing = Some(Editing {
            body_part_id: body_part_id.into(),
            exercise_id: exercise_id.into(),
            editing_id: None,
            slots: commit::empty_slots(),
        });
        self.transition(View::EditSets);
        Ok(())
    }

    /// Reopens a stored entry with its sets loaded into the slots.
    pub fn edit_existing(&mut self, id: &str) -> Result<(), SessionError> {
        self.expect_view(View::Day, "edit an entry")?;
        let entry = self
            .store
            .get(id)
            .ok_or_else(|| SessionError::MissingEntry(id.to_string()))?;
        self.selected = Some(entry.date);
        self.editing = Some(Editing {
            body_part_id: entry.body_part_id.clone(),
            exercise_id: entry.exercise_id.clone(),
            editing_id: Some(entry.id.clone()),
            slots: commit::slots_from_entry(entry),
        });
        self.transition(View::EditSets);
        Ok(())
    }

    /// Replaces the text of one slot.
    pub fn set_slot(&mut self, index: usize, input: SetInput) -> Result<(), SessionError> {
        self.expect_view(View::EditSets, "edit a slot")?;
        if index >= SLOT_COUNT {
            return Err(SessionError::SlotOutOfRange(index));
        }
        if let Some(editing) = self.editing.as_mut() {
            editing.slots[index] = input;
        }
        Ok(())
    }

    /// Leaves the editor, committing the slots on the way out.
    ///
    /// The view moves to `Day` even when persisting fails; the error is
    /// returned and the in-memory change stays applied.
    pub fn leave_edit(&mut self) -> Result<Option<WorkoutEntry>, SessionError> {
        self.expect_view(View::EditSets, "leave the editor")?;
        let editing = self.editing.take();
        self.transition(View::Day);

        let (Some(editing), Some(date)) = (editing, self.selected) else {
            return Ok(None);
        };
        let ctx = CommitContext {
            date,
            body_part_id: editing.body_part_id,
            exercise_id: editing.exercise_id,
            editing_id: editing.editing_id,
        };
        Ok(commit::commit(&mut self.store, &editing.slots, &ctx)?)
    }

    fn expect_view(&self, expected: View, action: &'static str) -> Result<(), SessionError> {
        if self.view == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.view,
                action,
            })
        }
    }

    fn transition(&mut self, to: View) {
        debug!(from = %self.view, %to, "view transition");
        self.view = to;
    }
}
