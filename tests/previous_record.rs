use chrono::{DateTime, Duration, NaiveDate, Utc};
use proptest::prelude::*;

use liftlog::{
    core::{previous::find_previous, store::EntryStore},
    entry::{SetRecord, WorkoutEntry},
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
}

fn base_ts() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
        .expect("ts")
        .with_timezone(&Utc)
}

fn entry(id: &str, day: NaiveDate, exercise: &str, created_min: i64) -> WorkoutEntry {
    WorkoutEntry {
        id: id.to_string(),
        date: day,
        body_part_id: "leg".to_string(),
        exercise_id: exercise.to_string(),
        sets: vec![SetRecord {
            set_number: 1,
            weight: 60.0,
            reps: 5.0,
            memo: String::new(),
        }],
        created_at: base_ts() + Duration::minutes(created_min),
    }
}

fn store_with(entries: Vec<WorkoutEntry>) -> EntryStore {
    let mut store = EntryStore::in_memory();
    for e in entries {
        store.upsert(e).expect("upsert");
    }
    store
}

#[test]
fn latest_on_or_before_query_date_wins() {
    let store = store_with(vec![
        entry("e1", date("2025-01-01"), "squat", 0),
        entry("e2", date("2025-01-10"), "squat", 1),
        entry("e3", date("2025-01-20"), "squat", 2),
        entry("other", date("2025-01-12"), "deadlift", 3),
    ]);

    let prev = find_previous(&store, "squat", date("2025-01-15"), None).expect("previous");
    assert_eq!(prev.id, "e2");
}

#[test]
fn same_day_entries_count_as_previous() {
    let store = store_with(vec![
        entry("e1", date("2025-01-01"), "squat", 0),
        entry("e2", date("2025-01-15"), "squat", 1),
    ]);
    let prev = find_previous(&store, "squat", date("2025-01-15"), None).expect("previous");
    assert_eq!(prev.id, "e2");
}

#[test]
fn none_when_nothing_qualifies() {
    let store = store_with(vec![
        entry("later", date("2025-02-01"), "squat", 0),
        entry("other", date("2025-01-01"), "deadlift", 1),
    ]);
    assert!(find_previous(&store, "squat", date("2025-01-15"), None).is_none());
    assert!(find_previous(&store, "bench_press", date("2025-01-15"), None).is_none());
    assert!(find_previous(&EntryStore::in_memory(), "squat", date("2025-01-15"), None).is_none());
}

#[test]
fn excluded_entry_is_skipped_even_when_latest() {
    let store = store_with(vec![
        entry("e1", date("2025-01-01"), "squat", 0),
        entry("editing", date("2025-01-15"), "squat", 1),
    ]);
    let prev = find_previous(&store, "squat", date("2025-01-15"), Some("editing")).expect("previous");
    assert_eq!(prev.id, "e1");

    let only = store_with(vec![entry("editing", date("2025-01-15"), "squat", 0)]);
    assert!(find_previous(&only, "squat", date("2025-01-15"), Some("editing")).is_none());
}

#[test]
fn same_date_duplicates_resolve_to_latest_created_at() {
    // The later-created entry sits earlier in the collection, so a pure
    // stable sort on date would pick the wrong one.
    let store = store_with(vec![
        entry("newer", date("2025-01-10"), "squat", 30),
        entry("older", date("2025-01-10"), "squat", 10),
    ]);
    let prev = find_previous(&store, "squat", date("2025-01-15"), None).expect("previous");
    assert_eq!(prev.id, "newer");
}

#[test]
fn full_ties_resolve_to_later_collection_position() {
    let store = store_with(vec![
        entry("first", date("2025-01-10"), "squat", 5),
        entry("second", date("2025-01-10"), "squat", 5),
    ]);
    let prev = find_previous(&store, "squat", date("2025-01-15"), None).expect("previous");
    assert_eq!(prev.id, "second");
}

#[test]
fn query_does_not_mutate_the_store() {
    let store = store_with(vec![entry("e1", date("2025-01-01"), "squat", 0)]);
    let before = store.entries_cloned();
    let _ = find_previous(&store, "squat", date("2025-01-15"), None);
    assert_eq!(store.entries_cloned(), before);
}

fn brute_force(entries: &[WorkoutEntry], exercise: &str, day: NaiveDate, exclude: Option<&str>) -> Option<String> {
    let mut best: Option<&WorkoutEntry> = None;
    for e in entries {
        if e.exercise_id != exercise || e.date > day || exclude == Some(e.id.as_str()) {
            continue;
        }
        let better = match best {
            None => true,
            Some(b) => (e.date, e.created_at) >= (b.date, b.created_at),
        };
        if better {
            best = Some(e);
        }
    }
    best.map(|e| e.id.clone())
}

proptest! {
    #[test]
    fn resolver_matches_brute_force_scan(
        rows in prop::collection::vec((0u8..3, 0i64..40, 0i64..5), 0..40),
        query_offset in 0i64..40,
        exclude_idx in prop::option::of(0usize..40),
    ) {
        let exercises = ["squat", "deadlift", "bench_press"];
        let start = date("2025-01-01");
        let entries: Vec<WorkoutEntry> = rows
            .iter()
            .enumerate()
            .map(|(i, (ex, day, created))| {
                entry(&format!("e{i}"), start + Duration::days(*day), exercises[usize::from(*ex)], *created)
            })
            .collect();
        let store = store_with(entries.clone());
        let query = start + Duration::days(query_offset);
        let exclude = exclude_idx.map(|i| format!("e{i}"));

        for exercise in exercises {
            let got = find_previous(&store, exercise, query, exclude.as_deref()).map(|e| e.id.clone());
            prop_assert_eq!(got, brute_force(&entries, exercise, query, exclude.as_deref()));
        }
    }
}
