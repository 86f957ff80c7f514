//! The document container and its wrap/unwrap machinery.
//!
//! All mutation funnels through the wrap operation and all extraction
//! funnels through unwrap. Wrap validates and converts host values into the
//! tagged [`Value`] representation at insertion time; unwrap materializes
//! the tagged tree back into plain values, re-checking the invariants it
//! relies on as it goes.
//!
//! # Key design decisions
//!
//! - **Shared handles**: a `Satchel` is a cheap-to-clone `Rc<RefCell<…>>`
//!   handle. Storing an existing document under a key stores the same
//!   handle, so mutation through any holder is visible to all of them. This
//!   is what makes deep chained mutation (`outer → inner → field`) write
//!   into the owner's tree rather than a copy.
//! - **Strict nesting**: a JSON map wrapped into a fresh nested document is
//!   always strict (`allow_opaque = false`), regardless of the parent's
//!   flag. Opaque-friendliness never propagates implicitly.
//! - **Depth-limited walks**: shared handles make reference cycles
//!   constructible, so every recursive walk carries a depth counter and
//!   fails with [`SatchelError::DepthLimitExceeded`] instead of overflowing
//!   the stack. JSON text input is additionally bounded by serde_json's own
//!   recursion limit during parsing.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::error::{Result, SatchelError};
use crate::list::List;
use crate::plain::PlainValue;
use crate::value::Value;

/// Maximum nesting depth for recursive walks over a document tree. Trees
/// built from JSON input stay well below this; only aliasing cycles reach it.
pub const MAX_DEPTH: usize = 128;

#[derive(Default)]
struct Inner {
    data: BTreeMap<String, Value>,
    allow_opaque: bool,
}

/// A schema-less JSON-compatible document.
///
/// A `Satchel` owns a string-keyed mapping whose values are scalars, shared
/// lists, nested documents, or (when built with `allow_opaque`) arbitrary
/// host values. Cloning a `Satchel` clones the handle: both clones read and
/// write the same underlying document.
///
/// Concurrent access is not supported: the handle is single-threaded by
/// construction (`Rc`), and no internal locking is performed.
///
/// ```
/// use satchel_core::Satchel;
///
/// let doc = Satchel::new();
/// doc.set("name", "Mr. Thing").unwrap();
/// doc.set("age", 42).unwrap();
/// assert_eq!(doc.to_json().unwrap(), r#"{"age":42,"name":"Mr. Thing"}"#);
/// ```
#[derive(Clone, Default)]
pub struct Satchel {
    inner: Rc<RefCell<Inner>>,
}

impl Satchel {
    /// New empty strict document.
    pub fn new() -> Satchel {
        Satchel::default()
    }

    /// Start building a document from an optional source plus field
    /// overrides. See [`Builder`].
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Construct a strict document from JSON text. The top-level value must
    /// be an object.
    pub fn from_json(text: &str) -> Result<Satchel> {
        Satchel::builder().json(text).build()
    }

    /// Construct a strict document from an already-parsed JSON object.
    pub fn from_map(map: JsonMap<String, JsonValue>) -> Result<Satchel> {
        Satchel::builder().map(map).build()
    }

    /// Whether this document accepts opaque values. Fixed at construction.
    pub fn allows_opaque(&self) -> bool {
        self.inner.borrow().allow_opaque
    }

    /// Insert or overwrite the value under `key`. The value is wrapped:
    /// sequences are normalized element by element into fresh shared lists,
    /// existing documents are stored by reference without re-validation, and
    /// opaque values are rejected unless this document allows them.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let allow = self.inner.borrow().allow_opaque;
        let wrapped = wrap_value(value.into(), allow, 0)?;
        self.inner.borrow_mut().data.insert(key.into(), wrapped);
        Ok(())
    }

    /// Insert or overwrite the value under `key` from a `serde_json::Value`.
    /// Objects become fresh strict nested documents; `null` has no
    /// representable shape and is rejected.
    pub fn set_json(&self, key: impl Into<String>, value: JsonValue) -> Result<()> {
        let allow = self.inner.borrow().allow_opaque;
        let wrapped = wrap_json(value, allow, 0)?;
        self.inner.borrow_mut().data.insert(key.into(), wrapped);
        Ok(())
    }

    /// Read the value under `key`, or `None` when absent.
    ///
    /// The returned value is the stored wrapped form: nested documents and
    /// lists come back as live shared handles, so mutating through them
    /// mutates this document's tree. Scalars are copied.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().data.get(key).cloned()
    }

    /// Strict read: fails with [`SatchelError::KeyNotFound`] when absent.
    pub fn try_get(&self, key: &str) -> Result<Value> {
        self.get(key)
            .ok_or_else(|| SatchelError::KeyNotFound(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().data.contains_key(key)
    }

    /// Top-level keys, in stable (sorted) iteration order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().data.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().data.is_empty()
    }

    /// Remove and return the value under `key`.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.borrow_mut().data.remove(key)
    }

    /// Materialize the document as a plain mapping with all levels fully
    /// unwrapped. The snapshot is an independent deep copy: mutating it, or
    /// the document, does not affect the other. Opaque values are carried
    /// through unmodified.
    pub fn to_plain(&self) -> Result<BTreeMap<String, PlainValue>> {
        self.to_plain_at(0)
    }

    /// Materialize as a `serde_json::Map`. Fails with
    /// [`SatchelError::NotSerializable`] if the tree holds an opaque value
    /// or a non-finite float.
    pub fn to_json_map(&self) -> Result<JsonMap<String, JsonValue>> {
        let plain = self.to_plain()?;
        let mut out = JsonMap::with_capacity(plain.len());
        for (key, value) in &plain {
            out.insert(key.clone(), value.to_json_value()?);
        }
        Ok(out)
    }

    /// Materialize as a `serde_json::Value` object.
    pub fn to_json_value(&self) -> Result<JsonValue> {
        Ok(JsonValue::Object(self.to_json_map()?))
    }

    /// Serialize the materialized document to JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(self.to_json_value()?.to_string())
    }

    /// True when both handles point at the same underlying document.
    pub fn same_doc(&self, other: &Satchel) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn to_plain_at(&self, depth: usize) -> Result<BTreeMap<String, PlainValue>> {
        if depth >= MAX_DEPTH {
            return Err(SatchelError::DepthLimitExceeded(MAX_DEPTH));
        }
        let inner = self.inner.borrow();
        let mut out = BTreeMap::new();
        for (key, value) in &inner.data {
            out.insert(key.clone(), unwrap_value(value, inner.allow_opaque, depth)?);
        }
        Ok(out)
    }

    pub(crate) fn fmt_at(&self, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.write_str("{")?;
        for (i, (key, value)) in inner.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key:?}: ")?;
            crate::value::fmt_value(value, depth, f)?;
        }
        f.write_str("}")
    }
}

/// Handle identity, not structural equality; see [`Satchel::to_plain`] for
/// structural comparison.
impl PartialEq for Satchel {
    fn eq(&self, other: &Satchel) -> bool {
        self.same_doc(other)
    }
}

impl fmt::Debug for Satchel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Satchel ")?;
        self.fmt_at(0, f)
    }
}

impl FromStr for Satchel {
    type Err = SatchelError;

    fn from_str(s: &str) -> Result<Satchel> {
        Satchel::from_json(s)
    }
}

/// Validate and convert an already-tagged value for storage.
///
/// Sequences are re-spined: each element is wrapped into a fresh shared
/// list, so storing a sequence never aliases the input spine (element
/// handles are still shared). Documents are stored by reference without
/// re-validation. Opaque values pass only under `allow_opaque`.
fn wrap_value(value: Value, allow_opaque: bool, depth: usize) -> Result<Value> {
    if depth >= MAX_DEPTH {
        return Err(SatchelError::DepthLimitExceeded(MAX_DEPTH));
    }
    match value {
        scalar @ (Value::Int(_) | Value::Bool(_) | Value::Float(_) | Value::Str(_)) => Ok(scalar),
        Value::List(list) => {
            let items = list.to_vec();
            let mut wrapped = Vec::with_capacity(items.len());
            for item in items {
                wrapped.push(wrap_value(item, allow_opaque, depth + 1)?);
            }
            Ok(Value::List(List::from_values(wrapped)))
        }
        Value::Doc(doc) => Ok(Value::Doc(doc)),
        Value::Opaque(o) => {
            if allow_opaque {
                Ok(Value::Opaque(o))
            } else {
                Err(SatchelError::DisallowedType(o.type_name()))
            }
        }
    }
}

/// Validate and convert a `serde_json::Value` for storage. JSON objects
/// become fresh nested documents, strict regardless of the parent's flag.
/// `null` is outside the scalar set and is rejected unconditionally.
fn wrap_json(value: JsonValue, allow_opaque: bool, depth: usize) -> Result<Value> {
    if depth >= MAX_DEPTH {
        return Err(SatchelError::DepthLimitExceeded(MAX_DEPTH));
    }
    match value {
        JsonValue::Bool(b) => Ok(Value::Bool(b)),
        JsonValue::Number(n) => Ok(wrap_number(&n)),
        JsonValue::String(s) => Ok(Value::Str(s)),
        JsonValue::Array(items) => {
            let mut wrapped = Vec::with_capacity(items.len());
            for item in items {
                wrapped.push(wrap_json(item, allow_opaque, depth + 1)?);
            }
            Ok(Value::List(List::from_values(wrapped)))
        }
        JsonValue::Object(map) => {
            let nested = Satchel::new();
            for (key, value) in map {
                // Nested documents never inherit the parent's flag, so
                // their entries wrap under allow_opaque = false.
                let wrapped = wrap_json(value, false, depth + 1)?;
                nested.inner.borrow_mut().data.insert(key, wrapped);
            }
            Ok(Value::Doc(nested))
        }
        JsonValue::Null => Err(SatchelError::DisallowedType("null")),
    }
}

/// Integers that fit i64 stay integers; everything else becomes a float.
fn wrap_number(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        // Only u64 beyond i64::MAX lands here; as_f64 is total for numbers
        // parsed without arbitrary_precision.
        None => Value::Float(n.as_f64().unwrap_or(0.0)),
    }
}

/// Recursively unwrap a stored value into its plain form.
///
/// `allow_opaque` is the flag of the document whose mapping (or list) holds
/// this value; nested documents switch to their own flag. An opaque value
/// reached under a strict flag means something bypassed wrap (the one known
/// route is direct list mutation) and is reported as an internal invariant
/// violation rather than a user error.
fn unwrap_value(value: &Value, allow_opaque: bool, depth: usize) -> Result<PlainValue> {
    if depth >= MAX_DEPTH {
        return Err(SatchelError::DepthLimitExceeded(MAX_DEPTH));
    }
    match value {
        Value::Int(i) => Ok(PlainValue::Int(*i)),
        Value::Bool(b) => Ok(PlainValue::Bool(*b)),
        Value::Float(f) => Ok(PlainValue::Float(*f)),
        Value::Str(s) => Ok(PlainValue::Str(s.clone())),
        Value::List(list) => {
            let items = list.to_vec();
            let mut out = Vec::with_capacity(items.len());
            for item in &items {
                out.push(unwrap_value(item, allow_opaque, depth + 1)?);
            }
            Ok(PlainValue::List(out))
        }
        Value::Doc(doc) => Ok(PlainValue::Map(doc.to_plain_at(depth + 1)?)),
        Value::Opaque(o) => {
            if allow_opaque {
                Ok(PlainValue::Opaque(o.clone()))
            } else {
                Err(SatchelError::Internal(
                    "opaque value reached unwrap in a strict document",
                ))
            }
        }
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

enum Source {
    Json(String),
    Map(JsonMap<String, JsonValue>),
}

/// Builder for the general construction form: an optional source (JSON text
/// or parsed object), the `allow_opaque` flag, and field overrides merged on
/// top of the source, keys-equal overwrite.
///
/// The flag is recorded on the document before any entry is wrapped, so wrap
/// decisions during construction already see the final value. Every entry,
/// source and overrides alike, goes through the same wrap path as
/// [`Satchel::set`].
///
/// ```
/// use satchel_core::Satchel;
///
/// let doc = Satchel::builder()
///     .json(r#"{"name": "unknown", "age": 42}"#)
///     .field("name", "Mr. Thing")
///     .build()
///     .unwrap();
/// assert_eq!(doc.get("name").unwrap().as_str(), Some("Mr. Thing"));
/// ```
#[derive(Default)]
pub struct Builder {
    source: Option<Source>,
    allow_opaque: bool,
    fields: Vec<(String, Value)>,
}

impl Builder {
    /// Use JSON text as the source. The top-level value must be an object.
    pub fn json(mut self, text: impl Into<String>) -> Builder {
        self.source = Some(Source::Json(text.into()));
        self
    }

    /// Use an already-parsed JSON object as the source.
    pub fn map(mut self, map: JsonMap<String, JsonValue>) -> Builder {
        self.source = Some(Source::Map(map));
        self
    }

    /// Accept opaque (non-JSON) values in this document.
    pub fn allow_opaque(mut self, allow: bool) -> Builder {
        self.allow_opaque = allow;
        self
    }

    /// Add a field override. Overrides are applied after the source, in the
    /// order given, and overwrite source entries with the same key.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Builder {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<Satchel> {
        let doc = Satchel {
            inner: Rc::new(RefCell::new(Inner {
                data: BTreeMap::new(),
                allow_opaque: self.allow_opaque,
            })),
        };
        if let Some(source) = self.source {
            let map = match source {
                Source::Json(text) => match serde_json::from_str(&text)? {
                    JsonValue::Object(map) => map,
                    other => return Err(SatchelError::TopLevelNotObject(json_type_name(&other))),
                },
                Source::Map(map) => map,
            };
            for (key, value) in map {
                doc.set_json(key, value)?;
            }
        }
        for (key, value) in self.fields {
            doc.set(key, value)?;
        }
        Ok(doc)
    }
}
