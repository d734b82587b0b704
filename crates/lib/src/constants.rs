//! Constants used throughout the library.
//!
//! Central definitions for the registered store type identifiers.

/// Type identifier of the append-only feed.
pub const FEED: &str = "feed";

/// Type identifier of the value set.
pub const SET: &str = "set";

/// Type identifier of the positional key-value store.
pub const ORDERED_KEYVALUE: &str = "ordered-keyvalue";
