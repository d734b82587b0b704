//! Error types for log implementations.

use thiserror::Error;

use crate::entry::ID;

/// Errors that can occur while appending to or reading from a log.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LogError {
    /// Entry not found by hash.
    #[error("Entry not found in log '{log}': {id}")]
    EntryNotFound {
        /// The log that was searched
        log: String,
        /// The hash that was not found
        id: ID,
    },

    /// The log refused to append an operation.
    #[error("Append to log '{log}' rejected: {reason}")]
    AppendRejected {
        /// The log that rejected the append
        log: String,
        /// Why the append was rejected
        reason: String,
    },

    /// A persisted entry belongs to a different log.
    #[error("Entry {id} belongs to log '{found}', expected '{expected}'")]
    ForeignEntry {
        /// The offending entry
        id: ID,
        /// The log being loaded
        expected: String,
        /// The log recorded on the entry
        found: String,
    },

    /// Persistence file uses a format version this build cannot read.
    #[error("Unsupported persistence version {version}")]
    UnsupportedVersion {
        /// The version found in the file
        version: u8,
    },

    /// Serialization of the log failed.
    #[error("Log serialization failed: {source}")]
    SerializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization of a persisted log failed.
    #[error("Log deserialization failed: {source}")]
    DeserializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the persistence file failed.
    #[error("Log file I/O failed: {source}")]
    FileIo {
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogError::EntryNotFound { .. })
    }

    /// Check if this error came from a rejected append.
    pub fn is_append_error(&self) -> bool {
        matches!(self, LogError::AppendRejected { .. })
    }

    /// Check if this error indicates corrupted or foreign persisted data.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            LogError::ForeignEntry { .. } | LogError::UnsupportedVersion { .. }
        )
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, LogError::FileIo { .. })
    }

    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            LogError::SerializationFailed { .. } | LogError::DeserializationFailed { .. }
        )
    }
}

impl From<LogError> for crate::Error {
    fn from(err: LogError) -> Self {
        crate::Error::Log(err)
    }
}
