/// Property-based tests for the document container.
///
/// Uses the `proptest` crate to generate random JSON-compatible trees and
/// verify the core contracts: construction → serialization round-trips,
/// materialization is idempotent and detached, and no input panics.
///
/// Generated values deliberately exclude `null` (outside the container's
/// scalar set, rejected by wrap) and whole-number floats (a JSON text
/// round-trip cannot tell `2.0` from `2` once re-parsed).
use proptest::prelude::*;
use satchel_core::Satchel;
use serde_json::{Map, Number, Value as JsonValue};

// ============================================================================
// Strategies
// ============================================================================

/// Generate an object key (non-empty, limited length).
fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,15}").unwrap()
}

/// Generate a string value with edge cases.
fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}",
        Just("".to_string()),
        Just("true".to_string()),
        Just("null".to_string()),
        Just("42".to_string()),
        Just("café".to_string()),
        Just("line1\nline2".to_string()),
        Just("say \"hi\"".to_string()),
        Just("path\\to\\file".to_string()),
    ]
}

/// Generate an integer that fits i64 (the container's integer scalar).
fn arb_integer() -> impl Strategy<Value = JsonValue> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|n| JsonValue::Number(Number::from(n)))
}

/// Generate a float with a short decimal expansion and a nonzero fractional
/// part, so text round-trips preserve it exactly.
fn arb_float() -> impl Strategy<Value = JsonValue> {
    (-100_000_000i64..100_000_000i64, 1u32..5u32).prop_filter_map(
        "must be finite and non-integral",
        |(mantissa, decimals)| {
            let f = mantissa as f64 / 10f64.powi(decimals as i32);
            if !f.is_finite() || f.fract() == 0.0 {
                return None;
            }
            Number::from_f64(f).map(JsonValue::Number)
        },
    )
}

/// Generate a scalar: string, integer, float, or bool. No null.
fn arb_scalar() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        3 => arb_string().prop_map(JsonValue::String),
        3 => arb_integer(),
        1 => arb_float(),
        1 => any::<bool>().prop_map(JsonValue::Bool),
    ]
}

/// Generate a JSON value with bounded nesting.
fn arb_value(depth: u32) -> impl Strategy<Value = JsonValue> {
    if depth == 0 {
        arb_scalar().boxed()
    } else {
        prop_oneof![
            4 => arb_scalar(),
            2 => prop::collection::vec((arb_key(), arb_value(depth - 1)), 0..5).prop_map(|pairs| {
                let mut map = Map::new();
                for (k, v) in pairs {
                    map.insert(k, v);
                }
                JsonValue::Object(map)
            }),
            2 => prop::collection::vec(arb_value(depth - 1), 0..5).prop_map(JsonValue::Array),
        ]
        .boxed()
    }
}

/// Generate a top-level object, the only accepted construction shape.
fn arb_object() -> impl Strategy<Value = Map<String, JsonValue>> {
    prop::collection::vec((arb_key(), arb_value(3)), 0..8).prop_map(|pairs| {
        let mut map = Map::new();
        for (k, v) in pairs {
            map.insert(k, v);
        }
        map
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Construction from a map, then serialization, preserves the JSON value.
    #[test]
    fn roundtrip_preserves_document(map in arb_object()) {
        let original = JsonValue::Object(map.clone());
        let doc = Satchel::from_map(map).unwrap();
        let out = doc.to_json().unwrap();
        let roundtripped: JsonValue = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(original, roundtripped, "serialized form: {}", out);
    }

    /// Text in, text out: parsing the serialized form builds an equal document.
    #[test]
    fn text_roundtrip_preserves_snapshot(map in arb_object()) {
        let doc = Satchel::from_map(map).unwrap();
        let restored = Satchel::from_json(&doc.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored.to_plain().unwrap(), doc.to_plain().unwrap());
    }

    /// Materialization is idempotent: two snapshots in a row are equal.
    #[test]
    fn to_plain_is_idempotent(map in arb_object()) {
        let doc = Satchel::from_map(map).unwrap();
        prop_assert_eq!(doc.to_plain().unwrap(), doc.to_plain().unwrap());
    }

    /// A snapshot taken before a mutation does not see the mutation.
    #[test]
    fn snapshots_are_detached(map in arb_object(), n in any::<i64>()) {
        // Longer than any generated key, so it is always fresh.
        let fresh_key = "a_key_no_strategy_generates";
        let doc = Satchel::from_map(map).unwrap();
        let before = doc.to_plain().unwrap();
        doc.set(fresh_key, n).unwrap();
        prop_assert!(!before.contains_key(fresh_key));
        let after = doc.to_plain().unwrap();
        prop_assert_eq!(after[fresh_key].as_int(), Some(n));
        prop_assert_eq!(after.len(), before.len() + 1);
    }

    /// Construction never panics, for any generated object.
    #[test]
    fn construction_never_panics(map in arb_object()) {
        let _ = Satchel::from_map(map);
    }

    /// Malformed text never panics, always errors.
    #[test]
    fn malformed_text_never_panics(text in "[\\{\\}\\[\\]a-z0-9:,\" ]{0,60}") {
        let _ = Satchel::from_json(&text);
    }

    /// A scalar written through `set` reads back equal.
    #[test]
    fn set_get_scalar_roundtrip(key in arb_key(), n in any::<i64>()) {
        let doc = Satchel::new();
        doc.set(key.as_str(), n).unwrap();
        prop_assert_eq!(doc.get(&key).unwrap().as_int(), Some(n));
    }
}
