//! Active filter values, keyed by column id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from column id to the active filter value.
///
/// A column without an entry is unfiltered. An empty value is never stored:
/// setting a filter to `""` removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl From<BTreeMap<String, String>> for FilterState {
    fn from(mut values: BTreeMap<String, String>) -> Self {
        values.retain(|_, value| !value.is_empty());
        Self { values }
    }
}

impl From<FilterState> for BTreeMap<String, String> {
    fn from(state: FilterState) -> Self {
        state.values
    }
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter for a column. Returns `true` if the state changed.
    pub fn set(&mut self, column_id: impl Into<String>, value: impl Into<String>) -> bool {
        let column_id = column_id.into();
        let value = value.into();
        if value.is_empty() {
            return self.clear(&column_id);
        }
        self.values.insert(column_id, value.clone()) != Some(value)
    }

    /// Removes the filter for a column. Returns `true` if one was removed.
    pub fn clear(&mut self, column_id: &str) -> bool {
        self.values.remove(column_id).is_some()
    }

    /// Removes every filter. Returns `true` if any were removed.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.values.is_empty();
        self.values.clear();
        changed
    }

    /// Returns the filter value for a column.
    pub fn get(&self, column_id: &str) -> Option<&str> {
        self.values.get(column_id).map(String::as_str)
    }

    /// Returns the number of active filters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(column_id, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
