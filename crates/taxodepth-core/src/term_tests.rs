//! Tests for `term` module

use super::term::*;
use serde_json::json;

#[test]
fn test_parse_numeric_term_id() {
    let id: TermId = "42".parse().expect("parse");
    assert_eq!(id, TermId::Int(42));
}

#[test]
fn test_parse_named_term_id() {
    let id: TermId = " fruit ".parse().expect("parse");
    assert_eq!(id, TermId::Name("fruit".to_string()));
}

#[test]
fn test_parse_overflowing_digits_falls_back_to_name() {
    let id: TermId = "99999999999999999999999".parse().expect("parse");
    assert!(matches!(id, TermId::Name(_)));
}

#[test]
fn test_parse_empty_term_id_fails() {
    let err = "  ".parse::<TermId>().unwrap_err();
    assert_eq!(err.code(), "TAXO-002");
}

#[test]
fn test_term_id_json_roundtrip_is_untagged() {
    let ids = vec![TermId::Int(7), TermId::from("apple")];

    let json = serde_json::to_value(&ids).expect("serialize");

    assert_eq!(json, json!([7, "apple"]));
    let back: Vec<TermId> = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, ids);
}

#[test]
fn test_term_id_from_value() {
    assert_eq!(TermId::from_value(&json!(3)), Some(TermId::Int(3)));
    assert_eq!(TermId::from_value(&json!("x")), Some(TermId::from("x")));
    assert_eq!(TermId::from_value(&json!(-1)), None);
    assert_eq!(TermId::from_value(&json!(null)), None);
}

#[test]
fn test_term_id_display() {
    assert_eq!(TermId::Int(12).to_string(), "12");
    assert_eq!(TermId::from("apple").to_string(), "apple");
}

#[test]
fn test_match_set_suppresses_duplicates() {
    let mut set = MatchSet::new();

    assert!(set.insert(TermId::Int(1)));
    assert!(!set.insert(TermId::Int(1)));
    assert!(set.insert(TermId::Int(2)));

    assert_eq!(set.len(), 2);
}

#[test]
fn test_match_set_sorted_view() {
    let set: MatchSet = [3u64, 1, 2].into_iter().map(TermId::from).collect();

    assert_eq!(
        set.to_sorted_vec(),
        vec![TermId::Int(1), TermId::Int(2), TermId::Int(3)]
    );
}

#[test]
fn test_match_set_superset() {
    let small: MatchSet = [TermId::Int(1)].into_iter().collect();
    let large: MatchSet = [TermId::Int(1), TermId::Int(2)].into_iter().collect();

    assert!(large.is_superset(&small));
    assert!(!small.is_superset(&large));
}
