use std::{marker::PhantomData, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::{Registered, Store, StoreIter};
use crate::{
    Result,
    constants::FEED,
    entry::{ID, Operation},
    log::{Log, Traversal},
    replay::{FeedReplay, ViewItem},
};

/// Lazy read over a [`Feed`], newest item first.
pub type FeedIter<T> = StoreIter<FeedReplay<Traversal>, T>;

/// An append-only list.
///
/// Every [`add`](Self::add) creates a new item, even for a value that is
/// already present; items are identified by the hash returned from `add` and
/// removed by that hash.
///
/// # Example
///
/// ```
/// # use std::sync::Arc;
/// # use recall::{Store, log::InMemoryLog, store::Feed};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> recall::Result<()> {
/// let feed: Feed<String> = Feed::new(Arc::new(InMemoryLog::new()));
/// let first = feed.add("hello".to_string()).await?;
/// feed.add("world".to_string()).await?;
/// feed.remove(&first).await?;
///
/// let items = feed.all().await?;
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].value, "world");
/// # Ok(())
/// # }
/// ```
pub struct Feed<T = Value> {
    log: Arc<dyn Log>,
    phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            phantom: PhantomData,
        }
    }
}

impl<T> Registered for Feed<T> {
    fn type_id() -> &'static str {
        FEED
    }
}

impl<T> Store for Feed<T> {
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

impl<T> Feed<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Appends `value` as a new item and returns its hash.
    pub async fn add(&self, value: T) -> Result<ID> {
        let value = super::encode(self.name(), &value)?;
        super::append(self.name(), &self.log, Operation::add(value)).await
    }

    /// Removes the item added under `hash`.
    ///
    /// Removing a hash that was never added is accepted. Returns the hash of
    /// the removal entry.
    pub async fn remove(&self, hash: &ID) -> Result<ID> {
        super::append(self.name(), &self.log, Operation::remove(hash)).await
    }

    /// Reads visible items newest first, at most `amount` of them.
    ///
    /// `None` reads everything; `Some(0)` returns an empty iterator without
    /// touching the log.
    pub async fn iter(&self, amount: Option<usize>) -> Result<FeedIter<T>> {
        let replay = super::traverse(&self.log, amount)
            .await?
            .map(|traversal| FeedReplay::new(traversal, amount));
        Ok(StoreIter::new(self.name(), replay))
    }

    /// Returns every visible item, oldest first.
    pub async fn all(&self) -> Result<Vec<ViewItem<T>>> {
        let mut items = self.iter(None).await?.collect::<Result<Vec<_>>>()?;
        items.reverse();
        Ok(items)
    }
}
