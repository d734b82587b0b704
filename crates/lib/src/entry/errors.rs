//! Entry-specific error types.

use thiserror::Error;

use super::ID;

/// Errors that can occur while building or checking log entries.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EntryError {
    /// Entry content could not be serialized for hashing
    #[error("Entry serialization failed: {context}")]
    SerializationFailed {
        /// Context where serialization failed
        context: String,
    },

    /// Stored hash does not match the entry content
    #[error("Entry hash mismatch: stored {stored}, computed {computed}")]
    HashMismatch {
        /// Hash recorded alongside the entry
        stored: ID,
        /// Hash recomputed from the entry content
        computed: ID,
    },
}

impl EntryError {
    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, EntryError::SerializationFailed { .. })
    }

    /// Check if this error indicates corrupted entry data.
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, EntryError::HashMismatch { .. })
    }
}

impl From<EntryError> for crate::Error {
    fn from(err: EntryError) -> Self {
        crate::Error::Entry(err)
    }
}
