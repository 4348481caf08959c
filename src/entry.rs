//! Workout entry and set records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BodyPartId, EntryId, ExerciseId, SLOT_COUNT, SetNumber};

/// One completed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    /// 1-based slot index. Not necessarily contiguous within an entry.
    pub set_number: SetNumber,
    /// Load lifted; always positive.
    pub weight: f64,
    /// Repetitions; always positive.
    pub reps: f64,
    /// Free-form trimmed note.
    #[serde(default)]
    pub memo: String,
}

/// All sets performed for one exercise on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    /// Unique entry id.
    pub id: EntryId,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Body part the exercise was filed under.
    pub body_part_id: BodyPartId,
    /// Exercise performed.
    pub exercise_id: ExerciseId,
    /// Sets ordered by `set_number` ascending.
    pub sets: Vec<SetRecord>,
    /// Creation time; preserved across replacement.
    pub created_at: DateTime<Utc>,
}

impl WorkoutEntry {
    /// Checks the record-level invariants a stored entry must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        let mut last = 0;
        for set in &self.sets {
            if set.set_number == 0 || usize::from(set.set_number) > SLOT_COUNT {
                return Err(format!("entry {}: set number {} out of range", self.id, set.set_number));
            }
            if set.set_number <= last {
                return Err(format!("entry {}: sets not in ascending order", self.id));
            }
            if !(set.weight > 0.0 && set.reps > 0.0) {
                return Err(format!("entry {}: set {} is not positive", self.id, set.set_number));
            }
            last = set.set_number;
        }
        Ok(())
    }

    /// Compact one-line rendering, e.g. `80kg x 10 / 85kg x 8`.
    pub fn summary(&self) -> String {
        self.sets
            .iter()
            .map(|s| format!("{}kg x {}", s.weight, s.reps))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sets: Vec<SetRecord>) -> WorkoutEntry {
        WorkoutEntry {
            id: "e1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            body_part_id: "leg".to_string(),
            exercise_id: "squat".to_string(),
            sets,
            created_at: DateTime::parse_from_rfc3339("2025-01-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    fn set(n: SetNumber, weight: f64, reps: f64) -> SetRecord {
        SetRecord {
            set_number: n,
            weight,
            reps,
            memo: String::new(),
        }
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let json = serde_json::to_value(entry(vec![set(1, 80.0, 10.0)])).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["bodyPartId"], "leg");
        assert_eq!(json["exerciseId"], "squat");
        assert_eq!(json["sets"][0]["setNumber"], 1);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn validate_rejects_out_of_range_and_unordered_sets() {
        assert!(entry(vec![set(1, 80.0, 10.0), set(3, 85.0, 8.0)]).validate().is_ok());
        assert!(entry(vec![set(6, 80.0, 10.0)]).validate().is_err());
        assert!(entry(vec![set(2, 80.0, 10.0), set(1, 80.0, 10.0)]).validate().is_err());
        assert!(entry(vec![set(1, 0.0, 10.0)]).validate().is_err());
    }

    #[test]
    fn summary_renders_each_set() {
        let e = entry(vec![set(1, 80.0, 10.0), set(3, 82.5, 8.0)]);
        assert_eq!(e.summary(), "80kg x 10 / 82.5kg x 8");
    }
}
