//! Shared ordered sequences.
//!
//! A `List` is the wrapped form of any host sequence stored in a document.
//! It is a handle: cloning it, or reading it back out of a document, yields
//! another view of the same underlying sequence, so mutation through any
//! handle is visible to every holder, including the owning document.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SatchelError};
use crate::value::{fmt_value, Value};

/// An ordered sequence of document values, held by reference.
///
/// Element writes go through `Into<Value>`, so only representable shapes can
/// enter. Writes do NOT re-consult the owning document's `allow_opaque` flag;
/// an opaque value pushed into a list owned by a strict document is caught by
/// the unwrap pass during materialization, not here.
#[derive(Clone, Default)]
pub struct List {
    items: Rc<RefCell<Vec<Value>>>,
}

impl List {
    /// New empty sequence.
    pub fn new() -> List {
        List::default()
    }

    pub(crate) fn from_values(values: Vec<Value>) -> List {
        List {
            items: Rc::new(RefCell::new(values)),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Read the element at `index`. Nested documents and lists come back as
    /// live handles; scalars are copied.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    /// Overwrite the element at `index`.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<()> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(SatchelError::IndexOutOfBounds { index, len }),
        }
    }

    /// Append an element.
    pub fn push(&self, value: impl Into<Value>) {
        self.items.borrow_mut().push(value.into());
    }

    /// Insert an element at `index`, shifting the tail right.
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> Result<()> {
        let mut items = self.items.borrow_mut();
        let len = items.len();
        if index > len {
            return Err(SatchelError::IndexOutOfBounds { index, len });
        }
        items.insert(index, value.into());
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop(&self) -> Option<Value> {
        self.items.borrow_mut().pop()
    }

    /// Snapshot of the spine. The returned `Vec` is independent, but its
    /// elements are still shared handles where the variants are shared.
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    /// True when both handles point at the same underlying sequence.
    pub fn same_list(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}

impl PartialEq for List {
    fn eq(&self, other: &List) -> bool {
        self.same_list(other)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_value(&Value::List(self.clone()), 0, f)
    }
}

impl<T: Into<Value>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> List {
        List::from_values(iter.into_iter().map(Into::into).collect())
    }
}
