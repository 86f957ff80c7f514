//! # satchel-record
//!
//! Binds a [`Satchel`](satchel_core::Satchel) document to a relational row
//! shape, so arbitrary semi-structured data can live next to fixed columns:
//! a `uuid` primary key, the serialized JSON payload, creation/modification
//! timestamps, and a projection of chosen top-level document keys into
//! dedicated index columns for the storage layer to index.
//!
//! The actual storage layer is out of scope; [`RowStore`] is the seam, and
//! [`MemoryStore`] is the in-process implementation used in tests.
//!
//! ```rust
//! use satchel_record::{MemoryStore, Record, RowStore};
//!
//! let mut record = Record::new(["name"]);
//! record.set("name", "Mr. Thing").unwrap();
//! record.set("age", 42).unwrap();
//!
//! let mut store = MemoryStore::new();
//! let row = record.to_row().unwrap();
//! let uuid = row.uuid.clone();
//! store.put(row);
//!
//! let restored = Record::from_row(store.fetch(&uuid).unwrap(), ["name"]).unwrap();
//! assert_eq!(restored.get("age").unwrap().as_int(), Some(42));
//! ```

pub mod error;
pub mod record;
pub mod store;

pub use error::{RecordError, Result};
pub use record::{Record, Row};
pub use store::{MemoryStore, RowStore};
