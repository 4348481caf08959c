//! Single-writer runtime around an [`crate::core::store::EntryStore`].

/// Runtime event stream payloads.
pub mod events;
/// Runtime task and client handle.
pub mod handle;
