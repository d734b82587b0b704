use recall::{Store, replay::ViewItem, store::Feed};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::helpers::test_log;

#[tokio::test]
async fn test_duplicates_are_kept_and_removed_by_hash() {
    let feed: Feed = Feed::new(test_log());
    let a1 = feed.add(json!("a")).await.unwrap();
    let b = feed.add(json!("b")).await.unwrap();
    let a2 = feed.add(json!("a")).await.unwrap();
    assert_ne!(a1, a2);

    let values: Vec<Value> = feed.all().await.unwrap().into_iter().map(|i| i.value).collect();
    assert_eq!(values, [json!("a"), json!("b"), json!("a")]);

    feed.remove(&a1).await.unwrap();
    let items = feed.all().await.unwrap();
    assert_eq!(
        items,
        [
            ViewItem { value: json!("b"), hash: b },
            ViewItem { value: json!("a"), hash: a2 },
        ]
    );
}

#[tokio::test]
async fn test_iter_is_newest_first() {
    let feed: Feed = Feed::new(test_log());
    for i in 0..3 {
        feed.add(json!(i)).await.unwrap();
    }
    let values: Vec<Value> = feed
        .iter(None)
        .await
        .unwrap()
        .map(|item| item.unwrap().value)
        .collect();
    assert_eq!(values, [json!(2), json!(1), json!(0)]);
}

#[tokio::test]
async fn test_removing_unknown_hash_is_harmless() {
    let feed: Feed = Feed::new(test_log());
    feed.remove(&"not-a-real-hash".into()).await.unwrap();
    let hash = feed.add(json!("after")).await.unwrap();

    let items = feed.all().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].hash, hash);
    assert_eq!(items[0].value, json!("after"));
}

#[tokio::test]
async fn test_removal_is_idempotent() {
    let feed: Feed = Feed::new(test_log());
    let x = feed.add(json!("x")).await.unwrap();
    feed.add(json!("y")).await.unwrap();
    feed.remove(&x).await.unwrap();
    feed.remove(&x).await.unwrap();

    let values: Vec<Value> = feed.all().await.unwrap().into_iter().map(|i| i.value).collect();
    assert_eq!(values, [json!("y")]);
}

#[tokio::test]
async fn test_empty_feed() {
    let feed: Feed = Feed::new(test_log());
    assert!(feed.all().await.unwrap().is_empty());
    assert_eq!(feed.iter(Some(10)).await.unwrap().count(), 0);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Message {
    author: String,
    body: String,
}

#[tokio::test]
async fn test_typed_feed() {
    let feed: Feed<Message> = Feed::new(test_log());
    let msg = Message {
        author: "ana".to_string(),
        body: "hi".to_string(),
    };
    let hash = feed.add(msg.clone()).await.unwrap();

    let items = feed.all().await.unwrap();
    assert_eq!(items, [ViewItem { value: msg, hash }]);
}

#[tokio::test]
async fn test_undecodable_item_is_an_error_per_item() {
    let log = test_log();
    let raw: Feed = Feed::new(log.clone());
    raw.add(json!({"author": "ana", "body": "ok"})).await.unwrap();
    raw.add(json!(42)).await.unwrap();

    let typed: Feed<Message> = Feed::new(log);
    let results: Vec<_> = typed.iter(None).await.unwrap().collect();
    assert_eq!(results.len(), 2);

    let err = results[0].as_ref().unwrap_err();
    assert!(err.is_store_error());
    assert!(err.is_serialization_error());
    assert_eq!(results[1].as_ref().unwrap().value.body, "ok");

    assert!(typed.all().await.is_err());
}

#[tokio::test]
async fn test_handles_share_the_log() {
    let feed: Feed = Feed::new(test_log());
    let other = feed.clone();
    other.add(json!("from clone")).await.unwrap();
    assert_eq!(feed.all().await.unwrap().len(), 1);
    assert_eq!(feed.name(), other.name());
    assert_eq!(feed.name(), feed.log().id());
}
