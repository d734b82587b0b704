use std::sync::Arc;

use recall::{
    Store,
    store::{Feed, OrderedKeyValue, Set},
};
use serde_json::json;

use crate::helpers::ScriptedLog;

#[tokio::test]
async fn test_append_failure_propagates() {
    let log = Arc::new(ScriptedLog::empty());

    let feed: Feed = Feed::new(log.clone());
    let err = feed.add(json!("x")).await.unwrap_err();
    assert!(err.is_append_error());
    assert_eq!(err.module(), "log");
    assert!(feed.remove(&"h".into()).await.unwrap_err().is_append_error());

    let set: Set = Set::new(log.clone());
    assert!(set.add(json!(1)).await.unwrap_err().is_append_error());
    assert!(set.del(json!(1)).await.unwrap_err().is_append_error());

    let kv: OrderedKeyValue = OrderedKeyValue::new(log.clone());
    assert!(kv.put("k", json!(1), None).await.unwrap_err().is_append_error());
    assert!(kv.move_to("k", 1.0).await.unwrap_err().is_append_error());
    assert!(kv.del("k").await.unwrap_err().is_append_error());

    // Nothing was written
    assert!(feed.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unserializable_value_is_store_error() {
    let log = Arc::new(ScriptedLog::empty());
    let feed: Feed<std::collections::HashMap<(u8, u8), u8>> = Feed::new(log);

    let mut value = std::collections::HashMap::new();
    value.insert((1, 2), 3);
    let err = feed.add(value).await.unwrap_err();
    assert!(err.is_store_error());
    assert!(err.is_serialization_error());
    assert!(!err.is_append_error());
}
