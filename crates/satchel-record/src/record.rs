//! The record: a document bound to a row's lifecycle.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use satchel_core::{Satchel, Value};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::Result;

/// The plain persisted shape of a record: what the storage layer receives on
/// save and hands back on load.
///
/// `indexes` holds the projected index columns: for every declared column
/// name, the document's top-level value of the same name as JSON, or `None`
/// when the document has no such key. Declaring the matching relational
/// columns (types, nullability) is the storage layer's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub uuid: String,
    pub json_data: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
    pub indexes: BTreeMap<String, Option<JsonValue>>,
}

/// A document bound to row identity and timestamps.
///
/// A fresh record has no uuid; one is assigned on the first [`to_row`]
/// call. The document itself is reachable through [`data`] and the
/// get/set passthroughs; there is no interception layer between the record
/// and its document.
///
/// [`to_row`]: Record::to_row
/// [`data`]: Record::data
#[derive(Debug, Clone)]
pub struct Record {
    uuid: Option<String>,
    data: Satchel,
    created_on: DateTime<Utc>,
    modified_on: DateTime<Utc>,
    index_columns: Vec<String>,
}

impl Record {
    /// Fresh record with an empty strict document. `index_columns` names the
    /// top-level document keys to project into index columns on save.
    pub fn new<I, S>(index_columns: I) -> Record
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Record::from_data(Satchel::new(), index_columns)
    }

    /// Bind an existing document to a fresh record.
    pub fn from_data<I, S>(data: Satchel, index_columns: I) -> Record
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let now = Utc::now();
        Record {
            uuid: None,
            data,
            created_on: now,
            modified_on: now,
            index_columns: index_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Restore a record from a previously saved row. An empty payload yields
    /// an empty document; otherwise the payload must be a JSON object.
    pub fn from_row<I, S>(row: Row, index_columns: I) -> Result<Record>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data = if row.json_data.trim().is_empty() {
            Satchel::new()
        } else {
            Satchel::from_json(&row.json_data)?
        };
        Ok(Record {
            uuid: Some(row.uuid),
            data,
            created_on: row.created_on,
            modified_on: row.modified_on,
            index_columns: index_columns.into_iter().map(Into::into).collect(),
        })
    }

    /// The bound document. Mutations through the returned handle are
    /// reflected in the next [`Record::to_row`].
    pub fn data(&self) -> &Satchel {
        &self.data
    }

    /// Row identity, once assigned by [`Record::to_row`].
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn modified_on(&self) -> DateTime<Utc> {
        self.modified_on
    }

    /// Declared index columns, in declaration order.
    pub fn index_columns(&self) -> &[String] {
        &self.index_columns
    }

    /// Read a top-level document value by name.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.get(key)
    }

    /// Write a top-level document value by name.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.data.set(key, value)?;
        Ok(())
    }

    /// Produce the row to persist: assigns a uuid on first save, bumps
    /// `modified_on`, serializes the document, and projects the declared
    /// index columns from the document's top-level keys.
    ///
    /// Fails if the document cannot be serialized (opaque values,
    /// non-finite floats, reference cycles).
    pub fn to_row(&mut self) -> Result<Row> {
        let map = self.data.to_json_map()?;

        let uuid = self
            .uuid
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        self.modified_on = Utc::now();

        let mut indexes = BTreeMap::new();
        for column in &self.index_columns {
            indexes.insert(column.clone(), map.get(column).cloned());
        }

        Ok(Row {
            uuid,
            json_data: JsonValue::Object(map).to_string(),
            created_on: self.created_on,
            modified_on: self.modified_on,
            indexes,
        })
    }
}
