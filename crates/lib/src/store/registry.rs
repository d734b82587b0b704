//! Store type registry
//!
//! Every collection type has a stable identifier that tools use to decide
//! how to replay a log. [`StoreType`] enumerates the identifiers this crate
//! knows how to open.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Feed, OrderedKeyValue, Set, StoreError};
use crate::constants::{FEED, ORDERED_KEYVALUE, SET};

/// Trait for types that carry a registered type identifier.
///
/// # Example
///
/// ```
/// use recall::{Registered, store::Feed};
///
/// assert_eq!(Feed::<serde_json::Value>::type_id(), "feed");
/// assert!(Feed::<serde_json::Value>::supports_type_id("feed"));
/// assert!(!Feed::<serde_json::Value>::supports_type_id("set"));
/// ```
pub trait Registered {
    /// Returns the unique identifier for this type.
    fn type_id() -> &'static str;

    /// Check if this type can replay a log written under `type_id`.
    ///
    /// Override this to accept identifiers of older revisions.
    fn supports_type_id(type_id: &str) -> bool {
        type_id == Self::type_id()
    }
}

/// The collection types that can be replayed from a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    Feed,
    Set,
    #[serde(rename = "ordered-keyvalue")]
    OrderedKeyValue,
}

impl StoreType {
    /// All registered store types.
    pub fn all() -> [StoreType; 3] {
        [StoreType::Feed, StoreType::Set, StoreType::OrderedKeyValue]
    }

    /// The registered identifier of this store type.
    pub fn type_id(&self) -> &'static str {
        match self {
            StoreType::Feed => <Feed as Registered>::type_id(),
            StoreType::Set => <Set as Registered>::type_id(),
            StoreType::OrderedKeyValue => <OrderedKeyValue as Registered>::type_id(),
        }
    }

    /// Finds the store type able to replay a log written under `type_id`.
    pub fn from_type_id(type_id: &str) -> Option<StoreType> {
        Self::all().into_iter().find(|t| match t {
            StoreType::Feed => <Feed as Registered>::supports_type_id(type_id),
            StoreType::Set => <Set as Registered>::supports_type_id(type_id),
            StoreType::OrderedKeyValue => {
                <OrderedKeyValue as Registered>::supports_type_id(type_id)
            }
        })
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_id())
    }
}

impl FromStr for StoreType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_type_id(s).ok_or_else(|| StoreError::UnknownType {
            type_id: s.to_string(),
        })
    }
}
