//! The operation log collaborator.
//!
//! The stores never own their data; they append [`Operation`]s to a [`Log`] and
//! rebuild their views from a [`Traversal`] of it. Real deployments plug in a
//! replicated, content-addressed log. [`InMemoryLog`] is the reference
//! implementation used by the CLI and the tests.

mod errors;
mod in_memory;

pub use errors::LogError;
pub use in_memory::InMemoryLog;

use async_trait::async_trait;

use crate::{
    Result,
    entry::{Entry, ID, Operation},
};

/// An append-only, causally ordered sequence of entries.
///
/// Implementations must be `Send` and `Sync` so that stores can share one log
/// behind an `Arc` and replay it from several tasks at once.
#[async_trait]
pub trait Log: Send + Sync {
    /// Address of this log. Stores use it as their name.
    fn id(&self) -> &str;

    /// Durably appends `op` and returns the hash of the new entry.
    ///
    /// On error nothing has been appended.
    async fn append(&self, op: Operation) -> Result<ID>;

    /// Returns a fresh traversal of the log, newest entry first.
    ///
    /// Every call yields an independent sequence over a consistent snapshot.
    /// Appends made after the call are not visible to the returned traversal.
    async fn traverse(&self) -> Result<Traversal>;
}

/// A finite, newest-first sequence of log entries.
///
/// Consumers pull entries one at a time and may stop at any point; dropping
/// the traversal is all the cleanup there is.
pub struct Traversal {
    entries: Box<dyn Iterator<Item = Entry> + Send>,
}

impl Traversal {
    /// Wraps an iterator that already yields entries newest first.
    pub fn new(entries: impl Iterator<Item = Entry> + Send + 'static) -> Self {
        Self {
            entries: Box::new(entries),
        }
    }

    /// Builds a traversal over entries stored oldest first.
    pub fn from_oldest_first(entries: Vec<Entry>) -> Self {
        Self::new(entries.into_iter().rev())
    }

    /// A traversal that yields nothing.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Iterator for Traversal {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl std::fmt::Debug for Traversal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traversal")
            .field("remaining", &self.entries.size_hint())
            .finish()
    }
}
