//! The wrapped value representation stored inside a document.
//!
//! `Value` is a closed tagged union: every shape a document can hold is one
//! of its variants, and values enter a document only through the wrap
//! operation on [`Satchel`](crate::Satchel). Scalars are stored inline;
//! lists and nested documents are shared handles, so cloning a `Value` clones
//! the handle, not the tree underneath it.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::list::List;
use crate::satchel::Satchel;

/// Cut-off for `Debug` rendering so cyclic documents stay printable.
const MAX_DEBUG_DEPTH: usize = 8;

/// A value stored in a document.
///
/// The scalar variants (`Int`, `Bool`, `Float`, `Str`) are always
/// JSON-serializable. `List` and `Doc` are shared handles into the owning
/// tree. `Opaque` carries an arbitrary host value and is only storable in a
/// document built with `allow_opaque`.
#[derive(Clone)]
pub enum Value {
    /// Signed integer scalar.
    Int(i64),
    /// Boolean scalar.
    Bool(bool),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    Str(String),
    /// Ordered sequence, held by reference.
    List(List),
    /// Nested document, held by reference.
    Doc(Satchel),
    /// Arbitrary host value, passed through unmodified. Never guaranteed
    /// serializable.
    Opaque(Opaque),
}

impl Value {
    /// Wrap an arbitrary host value as an opaque payload. The result is only
    /// accepted by documents built with `allow_opaque`.
    pub fn opaque<T: Any>(value: T) -> Value {
        Value::Opaque(Opaque::new(value))
    }

    /// Human-readable name of the stored shape, used in error messages.
    /// Opaque values report the type name captured at construction.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Doc(_) => "document",
            Value::Opaque(o) => o.type_name(),
        }
    }

    /// True for the four scalar variants.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Bool(_) | Value::Float(_) | Value::Str(_)
        )
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The shared list handle, if this value is a list.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// The shared document handle, if this value is a nested document.
    pub fn as_doc(&self) -> Option<&Satchel> {
        match self {
            Value::Doc(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }
}

/// Scalars compare by content. Lists, nested documents, and opaque values
/// compare by handle identity: two independently built but structurally equal
/// trees are NOT equal. Structural comparison goes through
/// [`Satchel::to_plain`](crate::Satchel::to_plain).
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.same_list(b),
            (Value::Doc(a), Value::Doc(b)) => a.same_doc(b),
            (Value::Opaque(a), Value::Opaque(b)) => a.same_value(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_value(self, 0, f)
    }
}

/// Depth-limited recursive rendering shared by the `Debug` impls of `Value`,
/// `List`, and `Satchel`. The cap keeps cyclic trees printable.
pub(crate) fn fmt_value(value: &Value, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if depth >= MAX_DEBUG_DEPTH {
        return f.write_str("…");
    }
    match value {
        Value::Int(i) => write!(f, "{i}"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Float(x) => write!(f, "{x}"),
        Value::Str(s) => write!(f, "{s:?}"),
        Value::List(list) => {
            f.write_str("[")?;
            for (i, item) in list.to_vec().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_value(item, depth + 1, f)?;
            }
            f.write_str("]")
        }
        Value::Doc(doc) => doc.fmt_at(depth + 1, f),
        Value::Opaque(o) => write!(f, "{o:?}"),
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Value {
        Value::Int(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Value {
        Value::Float(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Value {
        Value::List(List::from_values(
            items.into_iter().map(Into::into).collect(),
        ))
    }
}

impl From<List> for Value {
    fn from(list: List) -> Value {
        Value::List(list)
    }
}

impl From<Satchel> for Value {
    fn from(doc: Satchel) -> Value {
        Value::Doc(doc)
    }
}

impl From<&Satchel> for Value {
    fn from(doc: &Satchel) -> Value {
        Value::Doc(doc.clone())
    }
}

/// An arbitrary host value stored by reference, with the concrete type name
/// captured at construction for diagnostics.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Rc<dyn Any>,
}

impl Opaque {
    /// Box a host value. The payload is shared, never cloned or inspected.
    pub fn new<T: Any>(value: T) -> Opaque {
        Opaque {
            type_name: std::any::type_name::<T>(),
            inner: Rc::new(value),
        }
    }

    /// Type name of the payload as captured at construction.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the payload as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// True when both handles point at the same payload.
    pub fn same_value(&self, other: &Opaque) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Opaque) -> bool {
        self.same_value(other)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>", self.type_name)
    }
}
