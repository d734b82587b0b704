use std::sync::Arc;

use recall::{
    Log,
    entry::{Op, Operation},
    log::InMemoryLog,
};
use serde_json::json;

#[tokio::test]
async fn test_traversal_is_newest_first() {
    let log = InMemoryLog::with_id("ops");
    for i in 0..4 {
        log.append(Operation::add(json!(i))).await.unwrap();
    }

    let values: Vec<_> = log.traverse().await.unwrap().map(|e| e.payload().value.clone()).collect();
    assert_eq!(values, [json!(3), json!(2), json!(1), json!(0)]);
}

#[tokio::test]
async fn test_entries_link_to_previous_head() {
    let log = InMemoryLog::new();
    let first = log.append(Operation::add(json!("a"))).await.unwrap();
    let second = log.append(Operation::add(json!("a"))).await.unwrap();
    assert_ne!(first, second);

    let entry = log.get(&second).await.unwrap();
    assert_eq!(entry.next(), &[first.clone()]);
    assert_eq!(entry.clock(), 2);
    assert_eq!(entry.log(), log.id());
    assert_eq!(log.heads().await, vec![second]);
}

#[tokio::test]
async fn test_get_unknown_hash_is_not_found() {
    let log = InMemoryLog::with_id("missing");
    let err = log.get(&"nope".into()).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.module(), "log");
}

#[tokio::test]
async fn test_traversals_are_independent() {
    let log = InMemoryLog::new();
    log.append(Operation::del_key("k")).await.unwrap();
    log.append(Operation::move_to("k", 1.0)).await.unwrap();

    let mut first = log.traverse().await.unwrap();
    assert_eq!(first.next().unwrap().payload().op, Op::Move);

    let second: Vec<_> = log.traverse().await.unwrap().collect();
    assert_eq!(second.len(), 2);
    assert_eq!(first.next().unwrap().payload().op, Op::Del);
    assert!(first.next().is_none());
}

#[tokio::test]
async fn test_concurrent_appends_are_serialized() {
    let log = Arc::new(InMemoryLog::new());
    let mut handles = Vec::new();
    for i in 0..16 {
        let log = Arc::clone(&log);
        handles.push(tokio::spawn(async move {
            log.append(Operation::add(json!(i))).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let entries = log.entries().await;
    assert_eq!(entries.len(), 16);
    for (i, pair) in entries.windows(2).enumerate() {
        assert_eq!(pair[1].next(), &[pair[0].hash().clone()]);
        assert_eq!(pair[1].clock(), i as u64 + 2);
    }
}
