//! Ordered key-value replay: visibility and position are decided per key.
//!
//! Walking the log newest first, a key's value is decided by the first `PUT`
//! or `DEL` found for it. Its position is the newest explicit assignment made
//! since its last `DEL`: a `MOVE`, or a `PUT` that carried a position. Because
//! a `MOVE` newer than the deciding `PUT` is met *before* it, moves are kept
//! as pending overrides until the `PUT` turns up. A `PUT` without a position
//! and without an override has to keep looking further back; such an item is
//! held in the output queue until the scan resolves it.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Budget;
use crate::entry::{Entry, ID, Op, PutValue};

/// A visible key as produced by [`OrderedReplay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedItem<T = Value> {
    pub key: String,
    pub value: T,
    pub position: f64,
    /// Hash of the `PUT` that decided the value.
    pub hash: ID,
}

/// A visible key as returned by a full, position-sorted read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedEntry<T = Value> {
    pub key: String,
    pub value: T,
    pub position: f64,
}

impl<T> From<OrderedItem<T>> for OrderedEntry<T> {
    fn from(item: OrderedItem<T>) -> Self {
        Self {
            key: item.key,
            value: item.value,
            position: item.position,
        }
    }
}

/// A settled key waiting to be emitted.
struct Slot {
    key: String,
    value: Value,
    hash: ID,
    /// `None` while the backward scan is still looking for the position.
    position: Option<f64>,
}

/// Lazily replays an ordered key-value store, yielding visible keys in the
/// order they were settled (most recently written first).
///
/// An entry without a key stops the replay: everything settled so far is
/// still emitted, nothing older is read.
pub struct OrderedReplay<I> {
    entries: I,
    settled: HashSet<String>,
    overrides: HashMap<String, f64>,
    queue: VecDeque<Slot>,
    /// Sequence number of `queue.front()`.
    front_seq: usize,
    /// Keys whose slot still lacks a position -> slot sequence number.
    unresolved: HashMap<String, usize>,
    budget: Budget,
    exhausted: bool,
    scanned: usize,
    emitted: usize,
}

impl<I> OrderedReplay<I>
where
    I: Iterator<Item = Entry>,
{
    /// Starts a replay over newest-first `entries`, stopping after `amount`
    /// items when given.
    pub fn new(entries: impl IntoIterator<IntoIter = I>, amount: Option<usize>) -> Self {
        Self {
            entries: entries.into_iter(),
            settled: HashSet::new(),
            overrides: HashMap::new(),
            queue: VecDeque::new(),
            front_seq: 0,
            unresolved: HashMap::new(),
            budget: Budget::new(amount),
            exhausted: false,
            scanned: 0,
            emitted: 0,
        }
    }

    /// Folds one entry into the scratch state.
    fn step(&mut self, entry: Entry) {
        self.scanned += 1;
        let (hash, op) = entry.into_parts();

        let key = match op.key {
            Some(key) if !key.is_empty() => key,
            _ => {
                // TODO: skip keyless entries instead of ending the replay once
                // existing logs have been checked for them.
                tracing::warn!(
                    hash = %hash,
                    op = %op.op,
                    "Entry without key, truncating replay"
                );
                self.exhausted = true;
                return;
            }
        };

        match op.op {
            Op::Put => {
                let Some(put) = PutValue::from_value(&op.value) else {
                    tracing::warn!(hash = %hash, key = %key, "Skipping malformed PUT");
                    return;
                };
                if self.settled.contains(&key) {
                    if let Some(position) = put.position {
                        self.resolve(&key, position);
                    }
                    return;
                }

                let position = self.overrides.remove(&key).or(put.position);
                let seq = self.front_seq + self.queue.len();
                if position.is_none() {
                    self.unresolved.insert(key.clone(), seq);
                }
                tracing::trace!(key = %key, hash = %hash, ?position, "Key settled");
                self.settled.insert(key.clone());
                self.queue.push_back(Slot {
                    key,
                    value: put.value,
                    hash,
                    position,
                });
            }
            Op::Move => {
                let Some(position) = op.value.as_f64() else {
                    tracing::warn!(
                        hash = %hash,
                        key = %key,
                        "Skipping MOVE without a position"
                    );
                    return;
                };
                if self.settled.contains(&key) {
                    self.resolve(&key, position);
                } else {
                    // The newest move is met first and wins
                    self.overrides.entry(key).or_insert(position);
                }
            }
            Op::Del => {
                if self.settled.contains(&key) {
                    // Deleted before the deciding PUT: no earlier position carries over
                    self.resolve(&key, 0.0);
                } else {
                    tracing::trace!(key = %key, hash = %hash, "Key removed");
                    self.overrides.remove(&key);
                    self.settled.insert(key);
                }
            }
            Op::Add => {}
        }
    }

    /// Gives a still-unresolved slot for `key` its position.
    fn resolve(&mut self, key: &str, position: f64) {
        if let Some(seq) = self.unresolved.remove(key) {
            let slot = &mut self.queue[seq - self.front_seq];
            slot.position = Some(position);
        }
    }

    /// Pops the front slot if its position is known.
    fn pop_ready(&mut self) -> Option<OrderedItem> {
        let position = self.queue.front()?.position?;
        let slot = self.queue.pop_front()?;
        self.front_seq += 1;
        Some(OrderedItem {
            key: slot.key,
            value: slot.value,
            position,
            hash: slot.hash,
        })
    }
}

impl<I> Iterator for OrderedReplay<I>
where
    I: Iterator<Item = Entry>,
{
    type Item = OrderedItem;

    fn next(&mut self) -> Option<OrderedItem> {
        loop {
            if self.budget.is_spent() {
                return None;
            }

            if let Some(item) = self.pop_ready() {
                self.budget.take();
                self.emitted += 1;
                return Some(item);
            }

            if self.exhausted {
                if self.queue.is_empty() {
                    tracing::debug!(
                        scanned = self.scanned,
                        emitted = self.emitted,
                        "Ordered replay finished"
                    );
                    return None;
                }
                // Nothing older assigns a position to these keys
                for slot in self.queue.iter_mut() {
                    slot.position.get_or_insert(0.0);
                }
                self.unresolved.clear();
                continue;
            }

            match self.entries.next() {
                Some(entry) => self.step(entry),
                None => self.exhausted = true,
            }
        }
    }
}

/// Replays the whole store and returns it sorted ascending by position.
///
/// The sort is stable: keys sharing a position keep the order in which the
/// replay emitted them.
pub fn all(entries: impl IntoIterator<Item = Entry>) -> Vec<OrderedEntry> {
    sort_by_position(OrderedReplay::new(entries, None).collect())
        .into_iter()
        .map(OrderedEntry::from)
        .collect()
}

/// Stable ascending sort on `position`.
pub(crate) fn sort_by_position<T>(mut items: Vec<OrderedItem<T>>) -> Vec<OrderedItem<T>> {
    items.sort_by(|a, b| a.position.total_cmp(&b.position));
    items
}

/// Looks up a single key, newest entry first.
///
/// Returns the first `PUT` payload found for `key`, or `None` if a `DEL` for
/// it comes first or the log never mentions it. `MOVE` entries are skipped.
pub fn lookup(entries: impl IntoIterator<Item = Entry>, key: &str) -> Option<PutValue> {
    for entry in entries {
        let op = entry.payload();
        if op.key.as_deref() != Some(key) {
            continue;
        }
        match op.op {
            Op::Put => match PutValue::from_value(&op.value) {
                Some(put) => return Some(put),
                None => {
                    tracing::warn!(hash = %entry.hash(), key, "Skipping malformed PUT");
                }
            },
            Op::Del => return None,
            Op::Move | Op::Add => {}
        }
    }
    None
}
