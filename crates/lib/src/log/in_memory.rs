//! In-memory log implementation
//!
//! A single-writer, linear log kept in a `Vec`, suitable for testing,
//! development, and the CLI. It can be saved to and loaded from a JSON file.

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Log, LogError, Traversal};
use crate::{
    Error, Result,
    entry::{Entry, ID, Operation},
};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Serializable form of the log for persistence
#[derive(Serialize, Deserialize)]
struct SerializableLog {
    /// File format version for compatibility checking
    #[serde(rename = "_v", default, skip_serializing_if = "is_v0")]
    version: u8,
    id: String,
    /// Entries oldest first
    entries: Vec<Entry>,
}

#[derive(Debug, Default)]
struct State {
    /// Entries in append order, oldest first
    entries: Vec<Entry>,
    /// hash -> index into `entries`
    index: HashMap<ID, usize>,
}

impl State {
    fn push(&mut self, entry: Entry) {
        self.index.insert(entry.hash().clone(), self.entries.len());
        self.entries.push(entry);
    }
}

/// A simple in-memory operation log.
///
/// Appends are serialized behind a write lock. Each new entry gets a Lamport
/// clock one higher than the previous entry and links to the previous head,
/// so appending the same operation twice yields two distinct hashes.
/// Traversals copy the entry list under the read lock and are unaffected by
/// later appends.
#[derive(Debug)]
pub struct InMemoryLog {
    id: String,
    state: RwLock<State>,
}

impl InMemoryLog {
    /// Creates a new, empty log with a random address.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Creates a new, empty log with the given address.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: RwLock::new(State::default()),
        }
    }

    /// Number of entries in the log.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Returns true if nothing has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }

    /// The current heads of the log. A linear log has at most one.
    pub async fn heads(&self) -> Vec<ID> {
        let state = self.state.read().await;
        state
            .entries
            .last()
            .map(|e| vec![e.hash().clone()])
            .unwrap_or_default()
    }

    /// Retrieves an entry by its hash.
    pub async fn get(&self, id: &ID) -> Result<Entry> {
        let state = self.state.read().await;
        state
            .index
            .get(id)
            .map(|&i| state.entries[i].clone())
            .ok_or_else(|| {
                LogError::EntryNotFound {
                    log: self.id.clone(),
                    id: id.clone(),
                }
                .into()
            })
    }

    /// Returns a copy of every entry, oldest first.
    pub async fn entries(&self) -> Vec<Entry> {
        self.state.read().await.entries.clone()
    }

    /// Saves the log to a JSON file.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let entries = self.state.read().await.entries.clone();
        let serializable = SerializableLog {
            version: PERSISTENCE_VERSION,
            id: self.id.clone(),
            entries,
        };

        let json = serde_json::to_string_pretty(&serializable)
            .map_err(|e| -> Error { LogError::SerializationFailed { source: e }.into() })?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| -> Error { LogError::FileIo { source: e }.into() })
    }

    /// Loads a log from a JSON file written by [`save_to_file`](Self::save_to_file).
    ///
    /// If the file does not exist, a new, empty log with a random address is
    /// returned. Every entry is re-hashed on load; a mismatch is an error.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = match tokio::fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(LogError::FileIo { source: e }.into()),
        };

        let serializable: SerializableLog = serde_json::from_str(&json)
            .map_err(|e| -> Error { LogError::DeserializationFailed { source: e }.into() })?;
        if serializable.version != PERSISTENCE_VERSION {
            return Err(LogError::UnsupportedVersion {
                version: serializable.version,
            }
            .into());
        }

        let mut state = State::default();
        for entry in serializable.entries {
            entry.verify()?;
            if entry.log() != serializable.id {
                return Err(LogError::ForeignEntry {
                    id: entry.hash().clone(),
                    expected: serializable.id.clone(),
                    found: entry.log().to_string(),
                }
                .into());
            }
            state.push(entry);
        }

        tracing::debug!(log = %serializable.id, entries = state.entries.len(), "Loaded log");
        Ok(Self {
            id: serializable.id,
            state: RwLock::new(state),
        })
    }
}

impl Default for InMemoryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Log for InMemoryLog {
    fn id(&self) -> &str {
        &self.id
    }

    async fn append(&self, op: Operation) -> Result<ID> {
        let mut state = self.state.write().await;
        let (clock, next) = match state.entries.last() {
            Some(head) => (head.clock() + 1, vec![head.hash().clone()]),
            None => (1, Vec::new()),
        };
        let kind = op.op;
        let entry = Entry::new(self.id.clone(), clock, next, op)?;
        let hash = entry.hash().clone();
        state.push(entry);

        tracing::debug!(log = %self.id, hash = %hash, op = %kind, clock, "Appended entry");
        Ok(hash)
    }

    async fn traverse(&self) -> Result<Traversal> {
        let entries = self.state.read().await.entries.clone();
        tracing::debug!(log = %self.id, entries = entries.len(), "Starting traversal");
        Ok(Traversal::from_oldest_first(entries))
    }
}
