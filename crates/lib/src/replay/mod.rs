//! Replay engines.
//!
//! Each collection's visible state is a fold over the log, newest entry
//! first. Walking backwards means the first entry that mentions a hash, value
//! or key decides it ("settles" it) and every older mention is ignored, so a
//! single pass is enough and reads can stop as soon as they have produced the
//! number of items they were asked for.
//!
//! The engines are plain iterators generic over any newest-first entry
//! iterator, usually a [`Traversal`](crate::log::Traversal). All scratch
//! state lives in the iterator and disappears when it is dropped.
//!
//! | engine            | settles on      | emits                           |
//! |-------------------|-----------------|---------------------------------|
//! | [`FeedReplay`]    | entry hash      | [`ViewItem`] per visible `ADD`  |
//! | [`SetReplay`]     | canonical value | [`ViewItem`] per visible value  |
//! | [`OrderedReplay`] | key             | [`OrderedItem`] per visible key |

pub mod feed;
pub mod ordered;
pub mod set;

pub use feed::FeedReplay;
pub use ordered::{OrderedEntry, OrderedItem, OrderedReplay, lookup};
use serde::{Deserialize, Serialize};
use serde_json::Value;
pub use set::SetReplay;

use crate::entry::ID;

/// A visible feed or set element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewItem<T = Value> {
    pub value: T,
    /// Hash of the `ADD` entry that made this element visible.
    pub hash: ID,
}

/// Remaining emission budget shared by the engines.
///
/// `None` is unbounded. `Some(0)` means the read is complete.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget(Option<usize>);

impl Budget {
    pub(crate) fn new(amount: Option<usize>) -> Self {
        Self(amount)
    }

    pub(crate) fn is_spent(&self) -> bool {
        self.0 == Some(0)
    }

    pub(crate) fn take(&mut self) {
        if let Some(n) = self.0.as_mut() {
            *n = n.saturating_sub(1);
        }
    }
}
