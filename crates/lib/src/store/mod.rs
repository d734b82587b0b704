//! Collection stores backed by an operation log.
//!
//! A store owns no state of its own. Writes turn into [`Operation`]s appended
//! to the shared [`Log`]; reads replay a fresh [`Traversal`] through the
//! matching engine in [`crate::replay`] and decode the values into the
//! store's item type `T` (any serde type, `serde_json::Value` by default).

use std::{marker::PhantomData, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Result,
    entry::{ID, Operation},
    log::{Log, Traversal},
    replay::{OrderedItem, ViewItem},
};

mod errors;
pub use errors::StoreError;

mod feed;
pub use feed::{Feed, FeedIter};

mod set;
pub use set::{Set, SetIter};

mod ordered_keyvalue;
pub use ordered_keyvalue::{OrderedIter, OrderedKeyValue, OrderedValue};

mod registry;
pub use registry::{Registered, StoreType};

/// A typed view over a log.
///
/// Implementations are cheap handles: cloning one shares the same log.
pub trait Store: Registered + Sized {
    /// Creates a store handle reading from and appending to `log`.
    fn new(log: Arc<dyn Log>) -> Self;

    /// Returns the log this store is backed by.
    fn log(&self) -> &Arc<dyn Log>;

    /// Returns the name of this store, which is the address of its log.
    fn name(&self) -> &str {
        self.log().id()
    }
}

/// Appends `op` on behalf of `store` and logs the outcome.
async fn append(store: &str, log: &Arc<dyn Log>, op: Operation) -> Result<ID> {
    let kind = op.op;
    match log.append(op).await {
        Ok(hash) => {
            tracing::debug!(store, op = %kind, hash = %hash, "Operation appended");
            Ok(hash)
        }
        Err(e) => {
            tracing::debug!(store, op = %kind, error = %e, "Append failed");
            Err(e)
        }
    }
}

/// Starts a traversal unless the caller asked for nothing.
async fn traverse(log: &Arc<dyn Log>, amount: Option<usize>) -> Result<Option<Traversal>> {
    if amount == Some(0) {
        return Ok(None);
    }
    Ok(Some(log.traverse().await?))
}

fn encode<T: Serialize>(store: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        StoreError::SerializationFailed {
            store: store.to_string(),
            reason: format!("Failed to serialize value: {e}"),
        }
        .into()
    })
}

fn decode<T: DeserializeOwned>(store: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        StoreError::DeserializationFailed {
            store: store.to_string(),
            reason: format!("Failed to deserialize value: {e}"),
        }
        .into()
    })
}

/// Conversion of a replayed item into its typed form.
pub trait DecodeItem<T> {
    /// The typed item.
    type Output;

    /// Decodes the item's value as `T`.
    fn decode(self, store: &str) -> Result<Self::Output>;
}

impl<T: DeserializeOwned> DecodeItem<T> for ViewItem {
    type Output = ViewItem<T>;

    fn decode(self, store: &str) -> Result<ViewItem<T>> {
        Ok(ViewItem {
            value: decode(store, self.value)?,
            hash: self.hash,
        })
    }
}

impl<T: DeserializeOwned> DecodeItem<T> for OrderedItem {
    type Output = OrderedItem<T>;

    fn decode(self, store: &str) -> Result<OrderedItem<T>> {
        Ok(OrderedItem {
            key: self.key,
            value: decode(store, self.value)?,
            position: self.position,
            hash: self.hash,
        })
    }
}

/// A lazy, typed read over one replay.
///
/// Yields `Err` for items whose value does not decode as `T` and keeps going
/// afterwards. Dropping the iterator early ends the read.
pub struct StoreIter<R, T> {
    store: String,
    replay: Option<R>,
    phantom: PhantomData<fn() -> T>,
}

impl<R, T> StoreIter<R, T> {
    fn new(store: &str, replay: Option<R>) -> Self {
        Self {
            store: store.to_string(),
            replay,
            phantom: PhantomData,
        }
    }
}

impl<R, T> Iterator for StoreIter<R, T>
where
    R: Iterator,
    R::Item: DecodeItem<T>,
{
    type Item = Result<<R::Item as DecodeItem<T>>::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.replay.as_mut()?.next()?;
        Some(item.decode(&self.store))
    }
}
