use std::{marker::PhantomData, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::{Registered, Store, StoreIter};
use crate::{
    Result,
    constants::SET,
    entry::{ID, Operation},
    log::{Log, Traversal},
    replay::{SetReplay, ViewItem},
};

/// Lazy read over a [`Set`], most recently added value first.
pub type SetIter<T> = StoreIter<SetReplay<Traversal>, T>;

/// A set of values.
///
/// Values are identified by their content: adding an equal value again
/// replaces the previous occurrence, and [`del`](Self::del) removes the value
/// no matter how many times it was added. Equality is decided on the
/// canonical JSON form, so map key order does not matter.
pub struct Set<T = Value> {
    log: Arc<dyn Log>,
    phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Set<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            phantom: PhantomData,
        }
    }
}

impl<T> Registered for Set<T> {
    fn type_id() -> &'static str {
        SET
    }
}

impl<T> Store for Set<T> {
    fn new(log: Arc<dyn Log>) -> Self {
        Self {
            log,
            phantom: PhantomData,
        }
    }

    fn log(&self) -> &Arc<dyn Log> {
        &self.log
    }
}

impl<T> Set<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Adds `value` to the set and returns the hash of the new entry.
    pub async fn add(&self, value: T) -> Result<ID> {
        let value = super::encode(self.name(), &value)?;
        super::append(self.name(), &self.log, Operation::add(value)).await
    }

    /// Removes `value` from the set.
    pub async fn del(&self, value: T) -> Result<ID> {
        let value = super::encode(self.name(), &value)?;
        super::append(self.name(), &self.log, Operation::del_value(value)).await
    }

    /// Reads visible values newest first, at most `amount` of them.
    ///
    /// `None` reads everything; `Some(0)` returns an empty iterator without
    /// touching the log.
    pub async fn iter(&self, amount: Option<usize>) -> Result<SetIter<T>> {
        let replay = super::traverse(&self.log, amount)
            .await?
            .map(|traversal| SetReplay::new(traversal, amount));
        Ok(StoreIter::new(self.name(), replay))
    }

    /// Returns every visible value, oldest first.
    pub async fn all(&self) -> Result<Vec<ViewItem<T>>> {
        let mut items = self.iter(None).await?.collect::<Result<Vec<_>>>()?;
        items.reverse();
        Ok(items)
    }
}
