//!
//! Recall: collection views replayed from an operation log.
//! This library turns an append-only log of operations into three read models.
//!
//! ## Core Concepts
//!
//! * **Entries (`entry::Entry`)**: Content-addressed log records, each carrying one `Operation`.
//! * **Logs (`log::Log`)**: The append-only collaborator the stores write to and replay from. `log::InMemoryLog` is a simple file-persistable implementation.
//! * **Replay (`replay`)**: Lazy engines that fold a newest-first traversal into a view without materializing the log.
//! * **Stores (`store::Store`)**: Typed facades over a log:
//!     * **Feed (`store::Feed`)**: An append-only list whose items are removed by hash.
//!     * **Set (`store::Set`)**: A set of values compared by content.
//!     * **OrderedKeyValue (`store::OrderedKeyValue`)**: A key-value map ordered by a numeric position per key.

pub mod canonical;
pub mod constants;
pub mod entry;
pub mod log;
pub mod replay;
pub mod store;

/// Re-export the core types for easier access.
pub use entry::{Entry, ID};
pub use log::Log;
pub use store::{Registered, Store};

/// Result type used throughout the Recall library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Recall library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured entry errors from the entry module
    #[error(transparent)]
    Entry(entry::EntryError),

    /// Structured log errors from the log module
    #[error(transparent)]
    Log(log::LogError),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Entry(_) => "entry",
            Error::Log(_) => "log",
            Error::Store(_) => "store",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Log(log_err) => log_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Entry(entry_err) => entry_err.is_integrity_error(),
            Error::Log(log_err) => log_err.is_integrity_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Log(log_err) => log_err.is_io_error(),
            _ => false,
        }
    }

    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Entry(entry_err) => entry_err.is_serialization_error(),
            Error::Log(log_err) => log_err.is_serialization_error(),
            Error::Store(store_err) => store_err.is_serialization_error(),
        }
    }

    /// Check if this error came from a log refusing an append.
    pub fn is_append_error(&self) -> bool {
        match self {
            Error::Log(log_err) => log_err.is_append_error(),
            _ => false,
        }
    }

    /// Check if this error is log-related.
    pub fn is_log_error(&self) -> bool {
        matches!(self, Error::Log(_))
    }

    /// Check if this error is store-related.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}
