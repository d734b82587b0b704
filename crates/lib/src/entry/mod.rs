//!
//! Defines the unit of the operation log (`Entry`) and the payload it carries.
//!
//! An `Entry` wraps one [`Operation`] together with its causal position in the
//! log (a Lamport clock and links to the previous heads). Its `ID` is the
//! SHA-256 of the canonical JSON of all of that, so two appends of the same
//! operation still produce distinct entries.

pub mod errors;
pub mod id;
pub mod operation;

pub use errors::EntryError;
pub use id::ID;
pub use operation::{Op, Operation, PutValue};
use serde::{Deserialize, Serialize};

use crate::{Result, canonical::to_canonical_string};

/// The hashed portion of an entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
struct EntryContent {
    /// Address of the log this entry was appended to.
    log: String,
    /// Lamport clock at append time.
    clock: u64,
    /// Heads of the log when this entry was appended.
    /// The vector is kept sorted.
    next: Vec<ID>,
    payload: Operation,
}

/// An immutable, content-addressed log entry.
///
/// Entries are created by a [`Log`](crate::log::Log) on append and are never
/// modified afterwards. Replay only looks at [`Entry::hash`] and
/// [`Entry::payload`]; the clock and links exist so that the hash is unique
/// and so that log implementations can order their entries.
///
/// ```
/// # use recall::entry::{Entry, Operation};
/// # use serde_json::json;
/// let first = Entry::new("log", 1, vec![], Operation::add(json!("a"))).unwrap();
/// let again = Entry::new("log", 2, vec![first.hash().clone()], Operation::add(json!("a")))
///     .unwrap();
/// assert_ne!(first.hash(), again.hash());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    hash: ID,
    #[serde(flatten)]
    content: EntryContent,
}

impl Entry {
    /// Creates an entry and computes its hash.
    pub fn new(
        log: impl Into<String>,
        clock: u64,
        mut next: Vec<ID>,
        payload: Operation,
    ) -> Result<Self> {
        next.sort();
        let content = EntryContent {
            log: log.into(),
            clock,
            next,
            payload,
        };
        let hash = Self::hash_content(&content)?;
        Ok(Self { hash, content })
    }

    fn hash_content(content: &EntryContent) -> Result<ID> {
        let json = serde_json::to_value(content).map_err(|e| EntryError::SerializationFailed {
            context: format!("entry content: {e}"),
        })?;
        Ok(ID::from_bytes(to_canonical_string(&json)))
    }

    /// The content-derived identifier of this entry.
    pub fn hash(&self) -> &ID {
        &self.hash
    }

    /// The operation record carried by this entry.
    pub fn payload(&self) -> &Operation {
        &self.content.payload
    }

    /// Consumes the entry, returning its hash and operation.
    pub fn into_parts(self) -> (ID, Operation) {
        (self.hash, self.content.payload)
    }

    /// Address of the log this entry belongs to.
    pub fn log(&self) -> &str {
        &self.content.log
    }

    /// Lamport clock value assigned at append time.
    pub fn clock(&self) -> u64 {
        self.content.clock
    }

    /// Hashes of the heads this entry was appended on top of.
    pub fn next(&self) -> &[ID] {
        &self.content.next
    }

    /// Recomputes the hash and checks it against the stored one.
    ///
    /// Used when entries come from outside the process, e.g. a persisted file.
    pub fn verify(&self) -> Result<()> {
        let expected = Self::hash_content(&self.content)?;
        if expected != self.hash {
            return Err(EntryError::HashMismatch {
                stored: self.hash.clone(),
                computed: expected,
            }
            .into());
        }
        Ok(())
    }
}
