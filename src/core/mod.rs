//! In-memory entry store, indexes, and the previous-record resolver.

/// Helper index aliases.
pub mod indices;
/// Previous-record resolver.
pub mod previous;
/// Authoritative entry store.
pub mod store;
