//! Set replay: visibility is decided per canonical value.

use std::collections::HashSet;

use super::{Budget, ViewItem};
use crate::{
    canonical::to_canonical_string,
    entry::{Entry, Op},
};

/// Lazily replays a set, yielding one item per visible value, newest first.
///
/// Values are compared by their canonical JSON encoding, so `{"a":1,"b":2}`
/// and `{"b":2,"a":1}` are the same element. The newest `ADD` or `DEL` of a
/// value decides it; the hash reported for a visible value is that of its
/// newest `ADD`.
pub struct SetReplay<I> {
    entries: I,
    settled: HashSet<String>,
    budget: Budget,
    scanned: usize,
    emitted: usize,
}

impl<I> SetReplay<I>
where
    I: Iterator<Item = Entry>,
{
    /// Starts a replay over newest-first `entries`, stopping after `amount`
    /// items when given.
    pub fn new(entries: impl IntoIterator<IntoIter = I>, amount: Option<usize>) -> Self {
        Self {
            entries: entries.into_iter(),
            settled: HashSet::new(),
            budget: Budget::new(amount),
            scanned: 0,
            emitted: 0,
        }
    }
}

impl<I> Iterator for SetReplay<I>
where
    I: Iterator<Item = Entry>,
{
    type Item = ViewItem;

    fn next(&mut self) -> Option<ViewItem> {
        if self.budget.is_spent() {
            return None;
        }

        for entry in self.entries.by_ref() {
            self.scanned += 1;
            let (hash, op) = entry.into_parts();
            if !matches!(op.op, Op::Add | Op::Del) {
                continue;
            }

            let key = to_canonical_string(&op.value);
            if !self.settled.insert(key) {
                continue;
            }

            if op.op == Op::Add {
                self.budget.take();
                self.emitted += 1;
                return Some(ViewItem {
                    value: op.value,
                    hash,
                });
            }
            tracing::trace!(hash = %hash, "Set value removed");
        }

        tracing::debug!(
            scanned = self.scanned,
            emitted = self.emitted,
            "Set replay finished"
        );
        None
    }
}

/// Replays the whole set and returns it ordered by each value's newest `ADD`,
/// oldest first.
pub fn all(entries: impl IntoIterator<Item = Entry>) -> Vec<ViewItem> {
    let mut items: Vec<ViewItem> = SetReplay::new(entries, None).collect();
    items.reverse();
    items
}
