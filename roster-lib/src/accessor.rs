//! Accessor paths: resolving `a.b[0]`-style paths against a record.
//!
//! Resolution never fails. Any missing key, missing index or type mismatch
//! along the way yields [`CellValue::Undefined`]. A path that cannot be parsed
//! at all resolves to `Undefined` for every record.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// One step of an accessor path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed accessor path such as `related_people.manager[0]`.
///
/// Dot-separated field names, each optionally followed by a single array
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AccessorPath {
    raw: String,
    /// `None` when `raw` is malformed.
    segments: Option<Vec<Segment>>,
}

impl AccessorPath {
    /// Parses a path. Malformed input is kept and resolves to `Undefined`.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = parse_segments(&raw);
        if segments.is_none() {
            log::warn!("Malformed accessor path '{}', it will always resolve to undefined", raw);
        }
        Self { raw, segments }
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the path parsed.
    pub fn is_valid(&self) -> bool {
        self.segments.is_some()
    }

    /// Resolves the path against a JSON value.
    pub fn resolve(&self, root: &Value) -> CellValue {
        let Some(segments) = &self.segments else {
            return CellValue::Undefined;
        };

        let mut current = root;
        for segment in segments {
            let next = match (segment, current) {
                (Segment::Key(key), Value::Object(fields)) => fields.get(key),
                (Segment::Index(index), Value::Array(items)) => items.get(*index),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return CellValue::Undefined,
            }
        }

        CellValue::from(current)
    }
}

impl From<String> for AccessorPath {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&str> for AccessorPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<AccessorPath> for String {
    fn from(path: AccessorPath) -> Self {
        path.raw
    }
}

impl fmt::Display for AccessorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segments(raw: &str) -> Option<Vec<Segment>> {
    if raw.is_empty() {
        return None;
    }

    let mut segments = Vec::new();
    for part in raw.split('.') {
        let (name, index) = match part.find('[') {
            Some(open) => {
                let rest = part[open + 1..].strip_suffix(']')?;
                let index = rest.parse::<usize>().ok()?;
                (&part[..open], Some(index))
            }
            None => (part, None),
        };

        if name.is_empty() || name.contains(']') {
            return None;
        }

        segments.push(Segment::Key(name.to_string()));
        if let Some(index) = index {
            segments.push(Segment::Index(index));
        }
    }

    Some(segments)
}

/// The value found at an accessor path.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// The path did not resolve.
    Undefined,
    /// The path resolved to JSON `null`.
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    /// An array or object. Rendered, but rarely useful to filter on.
    Structured(Value),
}

impl CellValue {
    /// Returns `true` for the undefined sentinel.
    pub fn is_undefined(&self) -> bool {
        matches!(self, CellValue::Undefined)
    }

    /// Coerces the value to the string used for filtering.
    ///
    /// Returns `None` for `Undefined`. `null` coerces to `"null"`, arrays join
    /// their elements with commas and objects become `"[object Object]"`.
    pub fn coerce(&self) -> Option<String> {
        match self {
            CellValue::Undefined => None,
            CellValue::Null => Some("null".to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Number(n) => Some(number_text(n)),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Structured(value) => Some(coerce_structured(value)),
        }
    }

    /// Returns the text shown in a cell. Missing and null values render empty.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Undefined | CellValue::Null => String::new(),
            other => other.coerce().unwrap_or_default(),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => CellValue::Number(n.clone()),
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Structured(other.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Formats a number the way it is shown to users: `1.0` becomes `"1"`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

fn coerce_structured(value: &Value) -> String {
    match value {
        // Nested nulls render as empty elements
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_structured)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
