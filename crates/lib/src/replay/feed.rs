//! Feed replay: visibility is decided per `ADD` entry hash.

use std::collections::HashSet;

use serde_json::Value;

use super::{Budget, ViewItem};
use crate::entry::{Entry, ID, Op};

/// Lazily replays a feed, yielding visible items newest first.
///
/// An `ADD` is visible unless a newer `DEL` names its hash. Both kinds of
/// entry settle a hash the first time it is seen, so duplicate deliveries and
/// removals of hashes that were never added are harmless. Two `ADD`s of the
/// same value are two separate items.
pub struct FeedReplay<I> {
    entries: I,
    settled: HashSet<ID>,
    budget: Budget,
    scanned: usize,
    emitted: usize,
}

impl<I> FeedReplay<I>
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

impl<I> Iterator for FeedReplay<I>
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
            match op.op {
                Op::Add => {
                    if self.settled.insert(hash.clone()) {
                        self.budget.take();
                        self.emitted += 1;
                        return Some(ViewItem {
                            value: op.value,
                            hash,
                        });
                    }
                }
                Op::Del => match op.value {
                    Value::String(target) => {
                        let target = ID::from(target);
                        if !self.settled.contains(&target) {
                            tracing::trace!(hash = %target, "Feed entry removed");
                            self.settled.insert(target);
                        }
                    }
                    other => {
                        tracing::warn!(
                            hash = %hash,
                            value = %other,
                            "Skipping feed removal without a hash"
                        );
                    }
                },
                Op::Put | Op::Move => {}
            }
        }

        tracing::debug!(
            scanned = self.scanned,
            emitted = self.emitted,
            "Feed replay finished"
        );
        None
    }
}

/// Replays the whole feed and returns it oldest first.
pub fn all(entries: impl IntoIterator<Item = Entry>) -> Vec<ViewItem> {
    let mut items: Vec<ViewItem> = FeedReplay::new(entries, None).collect();
    items.reverse();
    items
}
