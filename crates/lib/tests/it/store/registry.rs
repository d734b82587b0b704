use recall::{
    Registered,
    store::{Feed, OrderedKeyValue, Set, StoreType},
};
use serde_json::Value;

#[test]
fn test_facades_report_registered_types() {
    assert_eq!(Feed::<Value>::type_id(), StoreType::Feed.type_id());
    assert_eq!(Set::<Value>::type_id(), StoreType::Set.type_id());
    assert_eq!(
        OrderedKeyValue::<Value>::type_id(),
        StoreType::OrderedKeyValue.type_id()
    );
}

#[test]
fn test_type_ids_round_trip() {
    for store_type in StoreType::all() {
        let parsed: StoreType = store_type.type_id().parse().unwrap();
        assert_eq!(parsed, store_type);
    }
    let err = "docstore".parse::<StoreType>().unwrap_err();
    assert!(err.is_unknown_type());
}
