//! Integration tests for token values and type descriptors.

use wicker::foundation::{Type, Value};

// =============================================================================
// Value Construction and Accessors
// =============================================================================

#[test]
fn conversions_round_trip_through_accessors() {
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(42i64).as_int(), Some(42));
    assert_eq!(Value::from(2.5f64).as_float(), Some(2.5));
    assert_eq!(Value::from("hello").as_str(), Some("hello"));
    assert_eq!(Value::from(vec![1i64, 2]).as_vec().map(|v| v.len()), Some(2));
}

#[test]
fn accessors_reject_other_variants() {
    let v = Value::from("text");
    assert_eq!(v.as_int(), None);
    assert_eq!(v.as_bool(), None);
    assert!(!v.is_nil());
    assert!(Value::Nil.is_nil());
}

#[test]
fn equality_distinguishes_variants() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::from("1"), Value::Int(1));
    assert_eq!(Value::from(vec![1i64]), Value::from(vec![1i64]));
}

// =============================================================================
// Type Descriptors
// =============================================================================

#[test]
fn value_type_matches_admits() {
    let samples = [
        Value::Nil,
        Value::Bool(false),
        Value::Int(7),
        Value::Float(0.5),
        Value::from("s"),
        Value::from(vec![1i64]),
    ];
    for v in &samples {
        assert!(v.value_type().admits(v), "{v} should admit itself");
        assert!(Type::Any.admits(v));
    }
}

#[test]
fn non_any_types_are_exclusive() {
    let v = Value::Int(3);
    for tag in [Type::Nil, Type::Bool, Type::Float, Type::String, Type::Vec] {
        assert!(!tag.admits(&v), "{tag} should not admit an int");
    }
}
