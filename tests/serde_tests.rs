#![cfg(feature = "serde")]

//! Integration tests for serde support in redblack.

use redblack::{RbTreeMap, RbTreeSet};
use rstest::rstest;

// =============================================================================
// RbTreeMap Integration Tests
// =============================================================================

#[rstest]
fn test_map_serializes_in_key_order() {
    let map = RbTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"1":"a","2":"b","3":"c"}"#);
}

#[rstest]
fn test_map_json_roundtrip() {
    let map: RbTreeMap<String, Vec<i32>> = (0..20)
        .map(|index| (format!("key{index:02}"), vec![index; 2]))
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    let restored: RbTreeMap<String, Vec<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(map, restored);
    assert_eq!(restored.validate(), Ok(()));
}

#[rstest]
fn test_map_deserialize_last_duplicate_wins() {
    let restored: RbTreeMap<String, i32> =
        serde_json::from_str(r#"{"b":1,"a":2,"b":3}"#).unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored["b"], 3);
}

#[rstest]
fn test_map_deserialize_rejects_sequence() {
    let result: Result<RbTreeMap<String, i32>, _> = serde_json::from_str("[1, 2]");
    assert!(result.is_err());
}

// =============================================================================
// RbTreeSet Integration Tests
// =============================================================================

#[rstest]
fn test_set_serializes_as_sorted_sequence() {
    let set = RbTreeSet::from([5, 1, 3]);
    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,3,5]");
}

#[rstest]
fn test_set_json_roundtrip_deduplicates() {
    let restored: RbTreeSet<i32> = serde_json::from_str("[4, 2, 4, 1]").unwrap();
    assert_eq!(restored.into_iter().collect::<Vec<_>>(), vec![1, 2, 4]);
}
