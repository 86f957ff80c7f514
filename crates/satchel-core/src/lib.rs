//! # satchel-core
//!
//! A recursive, schema-less JSON-compatible document container.
//!
//! A [`Satchel`] holds string-keyed, arbitrarily nested data (scalars,
//! sequences, and nested documents) and guarantees at every mutation that
//! the whole tree stays JSON-serializable, unless the document was built
//! with `allow_opaque` to explicitly opt out. Validation happens at the
//! boundary: every write funnels through a recursive wrap operation, every
//! materialization through the inverse unwrap.
//!
//! ## Quick start
//!
//! ```rust
//! use satchel_core::Satchel;
//!
//! let doc = Satchel::builder()
//!     .field("name", "Mr. Thing")
//!     .field("age", 42)
//!     .build()
//!     .unwrap();
//!
//! // Serialize, and build an equal document back from the text.
//! let text = doc.to_json().unwrap();
//! let restored = Satchel::from_json(&text).unwrap();
//! assert_eq!(restored.to_plain().unwrap(), doc.to_plain().unwrap());
//! ```
//!
//! Nested documents are shared handles, so mutation reaches through every
//! level of the tree:
//!
//! ```rust
//! use satchel_core::Satchel;
//!
//! let inner = Satchel::new();
//! inner.set("name", "Dog").unwrap();
//! let outer = Satchel::new();
//! outer.set("dog", inner.clone()).unwrap();
//!
//! inner.set("name", "Doggie").unwrap();
//! assert_eq!(outer.to_json().unwrap(), r#"{"dog":{"name":"Doggie"}}"#);
//! ```
//!
//! ## Modules
//!
//! - [`satchel`] — the container, its builder, and the wrap/unwrap passes
//! - [`value`] — the tagged stored representation ([`Value`], [`Opaque`])
//! - [`list`] — shared ordered sequences
//! - [`plain`] — the unwrapped snapshot representation ([`PlainValue`])
//! - [`error`] — error types

pub mod error;
pub mod list;
pub mod plain;
pub mod satchel;
pub mod value;

pub use error::{Result, SatchelError};
pub use list::List;
pub use plain::PlainValue;
pub use satchel::{Builder, Satchel, MAX_DEPTH};
pub use value::{Opaque, Value};
