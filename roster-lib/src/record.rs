//! Records and record snapshots

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::accessor::{AccessorPath, CellValue};
use crate::error::{SnapshotError, json_kind};

/// Stable identity of a record.
///
/// Integer ids are stored in their decimal form, so `7` and `"7"` name the
/// same record. Selection is tracked by this identity, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

/// One item of the underlying collection.
///
/// The payload is an arbitrary JSON value; no schema is enforced beyond what
/// column accessors reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    data: Value,
}

impl Record {
    /// Creates a record with an explicit id.
    pub fn new(id: impl Into<RecordId>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Builds a record from a JSON object, taking its identity from the `id` field.
    ///
    /// `index` is the position in the source array and is only used for errors.
    pub fn from_value(index: usize, data: Value) -> Result<Self, SnapshotError> {
        let Value::Object(fields) = &data else {
            return Err(SnapshotError::NotAnObject {
                index,
                kind: json_kind(&data),
            });
        };

        let id = match fields.get("id") {
            None => return Err(SnapshotError::MissingId { index }),
            Some(Value::String(s)) => RecordId::new(s.as_str()),
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => RecordId::new(n.to_string()),
            Some(other) => {
                return Err(SnapshotError::InvalidId {
                    index,
                    kind: json_kind(other),
                });
            }
        };

        Ok(Self { id, data })
    }

    /// Returns the record id.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the raw JSON payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Resolves a column accessor against this record.
    pub fn resolve(&self, path: &AccessorPath) -> CellValue {
        path.resolve(&self.data)
    }
}

/// An immutable, ordered collection of records handed to the engine.
///
/// A reload replaces the snapshot wholesale; nothing is diffed.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<Record>,
    positions: HashMap<RecordId, usize>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a snapshot from records, rejecting duplicate ids.
    pub fn from_records(records: Vec<Record>) -> Result<Self, SnapshotError> {
        let mut positions = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if positions.insert(record.id.clone(), index).is_some() {
                return Err(SnapshotError::duplicate(record.id.as_str()));
            }
        }
        Ok(Self { records, positions })
    }

    /// Creates a snapshot from a JSON array of objects.
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        let Value::Array(items) = value else {
            return Err(SnapshotError::NotAnArray {
                kind: json_kind(&value),
            });
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Record::from_value(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records)
    }

    /// Parses a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Returns the records in snapshot order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if a record with this id exists.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.positions.contains_key(id)
    }

    /// Returns the position of a record in snapshot order.
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.position(id).map(|index| &self.records[index])
    }
}
