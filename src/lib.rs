//! Personal exercise log: sets per exercise per day, a month grid to find
//! active days, and the previous performance of an exercise for reference.
//!
//! # Examples
//!
//! Committing the edit form and looking up the previous record:
//! ```
//! use chrono::NaiveDate;
//! use liftlog::{
//!     commit::{commit, CommitContext, SetInput},
//!     core::{previous::find_previous, store::EntryStore},
//! };
//!
//! let mut store = EntryStore::in_memory();
//! let ctx = CommitContext {
//!     date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
//!     body_part_id: "leg".to_string(),
//!     exercise_id: "squat".to_string(),
//!     editing_id: None,
//! };
//! let slots = [
//!     SetInput::new("80", "10", ""),
//!     SetInput::default(),
//!     SetInput::new("85", "8", "grind"),
//!     SetInput::default(),
//!     SetInput::default(),
//! ];
//! let entry = commit(&mut store, &slots, &ctx).expect("commit").expect("entry");
//! assert_eq!(entry.sets.len(), 2);
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let prev = find_previous(&store, "squat", day, None).expect("previous");
//! assert_eq!(prev.id, entry.id);
//! ```
//!
//! Persisting through SQLite:
//! ```no_run
//! use liftlog::{
//!     core::store::{EntryStore, StoreConfig},
//!     persist::sqlite::SqliteKv,
//! };
//!
//! let kv = SqliteKv::open("liftlog.db").expect("open sqlite");
//! let store = EntryStore::load(Box::new(kv), StoreConfig::default());
//! println!("{} entries", store.len());
//! ```
#![warn(missing_docs)]

/// Month grid and date helpers.
pub mod calendar;
/// Body-part and exercise catalog.
pub mod catalog;
/// Slot reconciliation and commit.
pub mod commit;
/// Core in-memory store, indexes, and resolver.
pub mod core;
/// Workout entry records.
pub mod entry;
/// Persistence abstraction and implementations.
pub mod persist;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Screen-flow state machine.
pub mod session;
/// Shared primitive types and constants.
pub mod types;
