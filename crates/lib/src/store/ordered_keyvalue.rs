use std::{marker::PhantomData, sync::Arc};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::{Registered, Store, StoreError, StoreIter};
use crate::{
    Result,
    constants::ORDERED_KEYVALUE,
    entry::{ID, Operation},
    log::{Log, Traversal},
    replay::{OrderedEntry, OrderedReplay, ordered},
};

/// Lazy read over an [`OrderedKeyValue`], most recently written key first.
pub type OrderedIter<T> = StoreIter<OrderedReplay<Traversal>, T>;

/// The value stored under a key, as returned by [`OrderedKeyValue::get`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedValue<T = Value> {
    pub value: T,
    /// The position given to the `PUT` that wrote this value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

/// A key-value store whose keys are ordered by a numeric position.
///
/// Positions are sort keys, not indices: they may be negative, fractional,
/// sparse or shared by several keys. A key keeps the position most recently
/// assigned to it by [`put`](Self::put) or [`move_to`](Self::move_to) until it
/// is deleted; keys that were never given one sort at `0`.
///
/// # Example
///
/// ```
/// # use std::sync::Arc;
/// # use recall::{Store, log::InMemoryLog, store::OrderedKeyValue};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> recall::Result<()> {
/// let kv: OrderedKeyValue<i64> = OrderedKeyValue::new(Arc::new(InMemoryLog::new()));
/// kv.put("b", 2, Some(1.0)).await?;
/// kv.put("a", 1, None).await?;
/// kv.move_to("b", -1.0).await?;
///
/// let keys: Vec<_> = kv.all().await?.into_iter().map(|e| e.key).collect();
/// assert_eq!(keys, ["b", "a"]);
/// # Ok(())
/// # }
/// ```
pub struct OrderedKeyValue<T = Value> {
    log: Arc<dyn Log>,
    phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for OrderedKeyValue<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            phantom: PhantomData,
        }
    }
}

impl<T> Registered for OrderedKeyValue<T> {
    fn type_id() -> &'static str {
        ORDERED_KEYVALUE
    }
}

impl<T> Store for OrderedKeyValue<T> {
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

impl<T> OrderedKeyValue<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Writes `value` under `key`, optionally placing it at `position`.
    ///
    /// Without a position the key keeps its current one (or `0` if it never
    /// had one). Fails without writing anything if `position` is NaN or
    /// infinite.
    pub async fn put(&self, key: impl Into<String>, value: T, position: Option<f64>) -> Result<ID> {
        let key = key.into();
        if let Some(position) = position {
            self.check_position(&key, position)?;
        }
        let value = super::encode(self.name(), &value)?;
        let op = Operation::put(key, value, position);
        super::append(self.name(), &self.log, op).await
    }

    /// Alias for [`put`](Self::put).
    pub async fn set(&self, key: impl Into<String>, value: T, position: Option<f64>) -> Result<ID> {
        self.put(key, value, position).await
    }

    /// Moves `key` to `position`.
    ///
    /// Moving a key that does not exist is recorded but has no visible effect.
    /// Fails without writing anything if `position` is NaN or infinite.
    pub async fn move_to(&self, key: impl Into<String>, position: f64) -> Result<ID> {
        let key = key.into();
        self.check_position(&key, position)?;
        super::append(self.name(), &self.log, Operation::move_to(key, position)).await
    }

    // JSON has no encoding for NaN or infinity
    fn check_position(&self, key: &str, position: f64) -> Result<()> {
        if position.is_finite() {
            return Ok(());
        }
        tracing::debug!(store = self.name(), key, position, "Rejected non-finite position");
        Err(StoreError::InvalidPosition {
            store: self.name().to_string(),
            key: key.to_string(),
            position,
        }
        .into())
    }

    /// Deletes `key`.
    pub async fn del(&self, key: impl Into<String>) -> Result<ID> {
        super::append(self.name(), &self.log, Operation::del_key(key)).await
    }

    /// Returns the value most recently written under `key`, or `None` if the
    /// key was deleted afterwards or never written.
    ///
    /// Stops reading the log at the first `PUT` or `DEL` of `key`.
    pub async fn get(&self, key: impl AsRef<str>) -> Result<Option<OrderedValue<T>>> {
        let traversal = self.log.traverse().await?;
        match ordered::lookup(traversal, key.as_ref()) {
            Some(put) => Ok(Some(OrderedValue {
                value: super::decode(self.name(), put.value)?,
                position: put.position,
            })),
            None => Ok(None),
        }
    }

    /// Reads visible keys, most recently written first, at most `amount` of
    /// them.
    ///
    /// `None` reads everything; `Some(0)` returns an empty iterator without
    /// touching the log.
    pub async fn iter(&self, amount: Option<usize>) -> Result<OrderedIter<T>> {
        let replay = super::traverse(&self.log, amount)
            .await?
            .map(|traversal| OrderedReplay::new(traversal, amount));
        Ok(StoreIter::new(self.name(), replay))
    }

    /// Returns every visible key sorted ascending by position.
    ///
    /// Keys sharing a position appear most recently written first.
    pub async fn all(&self) -> Result<Vec<OrderedEntry<T>>> {
        let items = self.iter(None).await?.collect::<Result<Vec<_>>>()?;
        Ok(ordered::sort_by_position(items)
            .into_iter()
            .map(OrderedEntry::from)
            .collect())
    }
}
