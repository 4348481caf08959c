//! Runtime event stream payloads.

use crate::types::EntryId;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// An entry was created or replaced and the collection flushed.
    Committed {
        /// Committed entry id.
        id: EntryId,
    },
    /// An entry was removed and the collection flushed.
    Removed {
        /// Removed entry id.
        id: EntryId,
    },
}
