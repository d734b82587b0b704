use recall::{Entry, ID, entry::Operation};
use serde_json::json;

use crate::helpers::chain;

#[test]
fn test_same_content_same_hash() {
    let a = Entry::new("log", 1, vec![], Operation::add(json!({"x": 1, "y": [1, 2]}))).unwrap();
    let b = Entry::new("log", 1, vec![], Operation::add(json!({"y": [1, 2], "x": 1}))).unwrap();
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn test_repeated_operation_gets_new_hash() {
    let entries = chain(
        "log",
        vec![
            Operation::add(json!("same")),
            Operation::add(json!("same")),
            Operation::add(json!("same")),
        ],
    );
    assert_ne!(entries[0].hash(), entries[1].hash());
    assert_ne!(entries[1].hash(), entries[2].hash());
    assert_eq!(entries[2].next(), &[entries[1].hash().clone()]);
}

#[test]
fn test_hash_is_sha256_hex() {
    let entry = Entry::new("log", 1, vec![], Operation::del_key("k")).unwrap();
    let hash: &ID = entry.hash();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}
