//! Errors raised while turning raw JSON into a record snapshot

/// Error type for building a [`Snapshot`](crate::record::Snapshot) from JSON.
///
/// These are the only failures the engine knows about: once a snapshot
/// exists, filtering, paging and selection never fail.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The top-level JSON value is not an array of records.
    #[error("Record snapshot must be a JSON array, got {kind}")]
    NotAnArray { kind: &'static str },

    /// An element of the array is not a JSON object.
    #[error("Record at index {index} is not an object (got {kind})")]
    NotAnObject { index: usize, kind: &'static str },

    /// A record has no `id` field.
    #[error("Record at index {index} has no 'id' field")]
    MissingId { index: usize },

    /// A record's `id` is neither a string nor an integer.
    #[error("Record at index {index} has an unusable id of type {kind}")]
    InvalidId { index: usize, kind: &'static str },

    /// Two records share the same identifier.
    #[error("Duplicate record id '{id}'")]
    DuplicateId { id: String },

    /// The input was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Creates a duplicate id error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }
}

/// Returns a short name for the JSON type of `value`, used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
