//! The unwrapped value representation produced by materialization.
//!
//! `PlainValue` is the inverse of the wrapped form: plain nested maps and
//! vectors instead of shared handles. A plain tree is an independent deep
//! snapshot (mutating it never touches the document it came from) and is
//! acyclic by construction, since materialization is depth-limited.

use std::collections::BTreeMap;

use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::error::{Result, SatchelError};
use crate::value::Opaque;

/// A fully-unwrapped document value.
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    Int(i64),
    Bool(bool),
    Float(f64),
    Str(String),
    List(Vec<PlainValue>),
    Map(BTreeMap<String, PlainValue>),
    /// Opaque payloads survive materialization unmodified (same handle), but
    /// refuse serialization.
    Opaque(Opaque),
}

impl PlainValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PlainValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlainValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PlainValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlainValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PlainValue]> {
        match self {
            PlainValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, PlainValue>> {
        match self {
            PlainValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            PlainValue::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Convert to a `serde_json::Value`. Fails with
    /// [`SatchelError::NotSerializable`] on opaque payloads and non-finite
    /// floats, which JSON cannot represent.
    pub fn to_json_value(&self) -> Result<JsonValue> {
        match self {
            PlainValue::Int(i) => Ok(JsonValue::Number(Number::from(*i))),
            PlainValue::Bool(b) => Ok(JsonValue::Bool(*b)),
            PlainValue::Float(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or(SatchelError::NotSerializable("non-finite float")),
            PlainValue::Str(s) => Ok(JsonValue::String(s.clone())),
            PlainValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.to_json_value()?);
                }
                Ok(JsonValue::Array(out))
            }
            PlainValue::Map(map) => {
                let mut out = JsonMap::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), value.to_json_value()?);
                }
                Ok(JsonValue::Object(out))
            }
            PlainValue::Opaque(o) => Err(SatchelError::NotSerializable(o.type_name())),
        }
    }
}

/// Serde support so plain snapshots can be embedded in caller-defined
/// serializable types. Opaque payloads surface as a serializer error.
impl Serialize for PlainValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PlainValue::Int(i) => serializer.serialize_i64(*i),
            PlainValue::Bool(b) => serializer.serialize_bool(*b),
            PlainValue::Float(f) => serializer.serialize_f64(*f),
            PlainValue::Str(s) => serializer.serialize_str(s),
            PlainValue::List(items) => serializer.collect_seq(items),
            PlainValue::Map(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    ser.serialize_entry(key, value)?;
                }
                ser.end()
            }
            PlainValue::Opaque(o) => Err(S::Error::custom(format!(
                "cannot serialize opaque value of type `{}`",
                o.type_name()
            ))),
        }
    }
}
