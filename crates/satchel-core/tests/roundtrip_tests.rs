use satchel_core::Satchel;

/// Assert that JSON text → document → JSON text preserves the value.
fn assert_roundtrip(json: &str) {
    let doc = Satchel::from_json(json).expect("construction failed");
    let out = doc.to_json().expect("serialization failed");
    let original: serde_json::Value = serde_json::from_str(json).unwrap();
    let roundtripped: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        original, roundtripped,
        "Roundtrip failed:\n  input JSON:  {json}\n  output JSON: {out}"
    );
}

// ============================================================================
// Flat objects
// ============================================================================

#[test]
fn roundtrip_empty_object() {
    assert_roundtrip("{}");
}

#[test]
fn roundtrip_flat_object() {
    assert_roundtrip(r#"{"name": "Alice", "age": 30, "active": true}"#);
}

#[test]
fn roundtrip_integer_values() {
    assert_roundtrip(r#"{"zero": 0, "neg": -7, "big": 9007199254740991}"#);
}

#[test]
fn roundtrip_float_values() {
    assert_roundtrip(r#"{"pi": 3.14, "neg": -0.5, "tiny": 0.001}"#);
}

#[test]
fn roundtrip_string_edge_cases() {
    assert_roundtrip(r#"{"empty": "", "quote": "say \"hi\"", "newline": "a\nb"}"#);
}

#[test]
fn roundtrip_unicode_strings() {
    assert_roundtrip(r#"{"cafe": "café", "greeting": "你好"}"#);
}

#[test]
fn roundtrip_keyword_like_strings() {
    assert_roundtrip(r#"{"t": "true", "f": "false", "n": "null", "num": "42"}"#);
}

// ============================================================================
// Nesting
// ============================================================================

#[test]
fn roundtrip_nested_object() {
    assert_roundtrip(r#"{"server": {"host": "localhost", "port": 8080}}"#);
}

#[test]
fn roundtrip_empty_nested_object() {
    assert_roundtrip(r#"{"empty": {}}"#);
}

#[test]
fn roundtrip_deeply_nested_object() {
    assert_roundtrip(r#"{"a": {"b": {"c": {"d": {"e": {"f": {"g": 1}}}}}}}"#);
}

#[test]
fn roundtrip_primitive_array() {
    assert_roundtrip(r#"{"scores": [95, 87, 92]}"#);
}

#[test]
fn roundtrip_empty_array() {
    assert_roundtrip(r#"{"items": []}"#);
}

#[test]
fn roundtrip_mixed_array() {
    assert_roundtrip(r#"{"mixed": [1, "two", 3.5, false, [4, 5], {"six": 6}]}"#);
}

#[test]
fn roundtrip_array_of_objects() {
    assert_roundtrip(r#"{"users": [{"name": "Alice", "age": 30}, {"name": "Bob", "age": 25}]}"#);
}

#[test]
fn roundtrip_nested_arrays() {
    assert_roundtrip(r#"{"matrix": [[1, 2], [3, 4]]}"#);
}

// ============================================================================
// Materialized equality
// ============================================================================

#[test]
fn roundtrip_document_snapshots_are_equal() {
    let json = r#"{"name": "Mr. Thing", "age": 42, "sons": [{"name": "Jr."}]}"#;
    let doc = Satchel::from_json(json).unwrap();
    let restored = Satchel::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(restored.to_plain().unwrap(), doc.to_plain().unwrap());
}

#[test]
fn roundtrip_preserves_key_set() {
    let doc = Satchel::from_json(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
    let restored = Satchel::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(restored.keys(), doc.keys());
}
