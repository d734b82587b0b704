use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use recall::{
    Entry, ID, Log, Result,
    entry::Operation,
    log::{InMemoryLog, LogError, Traversal},
};

/// Creates an empty in-memory log behind an `Arc`.
pub fn test_log() -> Arc<InMemoryLog> {
    Arc::new(InMemoryLog::new())
}

/// Builds a linked chain of entries from oldest-first operations.
pub fn chain(log: &str, ops: Vec<Operation>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::with_capacity(ops.len());
    for (i, op) in ops.into_iter().enumerate() {
        let next = entries.last().map(|e| vec![e.hash().clone()]).unwrap_or_default();
        entries.push(Entry::new(log, i as u64 + 1, next, op).unwrap());
    }
    entries
}

/// A log with fixed contents that rejects every append.
///
/// Lets tests feed arbitrary, even malformed, operation records to the stores.
pub struct ScriptedLog {
    id: String,
    entries: Vec<Entry>,
}

impl ScriptedLog {
    pub fn new(ops: Vec<Operation>) -> Self {
        let id = "scripted".to_string();
        let entries = chain(&id, ops);
        Self { id, entries }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl Log for ScriptedLog {
    fn id(&self) -> &str {
        &self.id
    }

    async fn append(&self, _op: Operation) -> Result<ID> {
        Err(LogError::AppendRejected {
            log: self.id.clone(),
            reason: "read-only".to_string(),
        }
        .into())
    }

    async fn traverse(&self) -> Result<Traversal> {
        Ok(Traversal::from_oldest_first(self.entries.clone()))
    }
}

/// Wraps an [`InMemoryLog`] and counts traversals and entries pulled from them.
pub struct CountingLog {
    inner: InMemoryLog,
    traversals: AtomicUsize,
    pulled: Arc<AtomicUsize>,
}

impl CountingLog {
    pub fn new() -> Self {
        Self {
            inner: InMemoryLog::new(),
            traversals: AtomicUsize::new(0),
            pulled: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn traversals(&self) -> usize {
        self.traversals.load(Ordering::SeqCst)
    }

    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.traversals.store(0, Ordering::SeqCst);
        self.pulled.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl Log for CountingLog {
    fn id(&self) -> &str {
        self.inner.id()
    }

    async fn append(&self, op: Operation) -> Result<ID> {
        self.inner.append(op).await
    }

    async fn traverse(&self) -> Result<Traversal> {
        self.traversals.fetch_add(1, Ordering::SeqCst);
        let pulled = Arc::clone(&self.pulled);
        let traversal = self.inner.traverse().await?;
        Ok(Traversal::new(traversal.inspect(move |_| {
            pulled.fetch_add(1, Ordering::SeqCst);
        })))
    }
}
