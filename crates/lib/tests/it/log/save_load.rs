use recall::{
    Log,
    entry::Operation,
    log::InMemoryLog,
};
use serde_json::{Value, json};
use tempfile::TempDir;

async fn saved_log(dir: &TempDir) -> (InMemoryLog, std::path::PathBuf) {
    let path = dir.path().join("log.json");
    let log = InMemoryLog::with_id("persisted");
    log.append(Operation::add(json!({"n": 1}))).await.unwrap();
    log.append(Operation::put("k", json!("v"), Some(2.0))).await.unwrap();
    log.append(Operation::del_key("k")).await.unwrap();
    log.save_to_file(&path).await.unwrap();
    (log, path)
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn write_json(path: &std::path::Path, value: &Value) {
    std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (log, path) = saved_log(&dir).await;

    let loaded = InMemoryLog::load_from_file(&path).await.unwrap();
    assert_eq!(loaded.id(), "persisted");
    assert_eq!(loaded.entries().await, log.entries().await);
    assert_eq!(loaded.heads().await, log.heads().await);

    // Appends continue the chain
    let hash = loaded.append(Operation::add(json!(2))).await.unwrap();
    let entry = loaded.get(&hash).await.unwrap();
    assert_eq!(entry.clock(), 4);
    assert_eq!(entry.next(), log.heads().await.as_slice());
}

#[tokio::test]
async fn test_version_zero_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let (_, path) = saved_log(&dir).await;
    let json = read_json(&path);
    assert!(json.get("_v").is_none());
    assert_eq!(json["entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_load_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = InMemoryLog::load_from_file(dir.path().join("absent.json")).await.unwrap();
    assert!(log.is_empty().await);
    assert!(!log.id().is_empty());
}

#[tokio::test]
async fn test_load_detects_tampered_payload() {
    let dir = tempfile::tempdir().unwrap();
    let (_, path) = saved_log(&dir).await;

    let mut json = read_json(&path);
    json["entries"][0]["payload"]["value"] = json!({"n": 2});
    write_json(&path, &json);

    let err = InMemoryLog::load_from_file(&path).await.unwrap_err();
    assert!(err.is_integrity_error());
    assert_eq!(err.module(), "entry");
}

#[tokio::test]
async fn test_load_rejects_foreign_entries() {
    let dir = tempfile::tempdir().unwrap();
    let (_, path) = saved_log(&dir).await;

    let mut json = read_json(&path);
    json["id"] = json!("someone-else");
    write_json(&path, &json);

    let err = InMemoryLog::load_from_file(&path).await.unwrap_err();
    assert!(err.is_integrity_error());
    assert!(err.to_string().contains("someone-else"));
}

#[tokio::test]
async fn test_load_rejects_unknown_version() {
    let dir = tempfile::tempdir().unwrap();
    let (_, path) = saved_log(&dir).await;

    let mut json = read_json(&path);
    json["_v"] = json!(1);
    write_json(&path, &json);

    let err = InMemoryLog::load_from_file(&path).await.unwrap_err();
    assert!(err.is_integrity_error());
}

#[tokio::test]
async fn test_load_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = InMemoryLog::load_from_file(&path).await.unwrap_err();
    assert!(err.is_serialization_error());
}

#[tokio::test]
async fn test_save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let log = InMemoryLog::new();
    let err = log
        .save_to_file(dir.path().join("no/such/dir/log.json"))
        .await
        .unwrap_err();
    assert!(err.is_io_error());
}
