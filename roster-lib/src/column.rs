//! Column definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::accessor::AccessorPath;
use crate::error::ConfigError;

/// How a column can be filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Case-insensitive prefix match on the resolved value.
    Text,
    /// Exact match against one of the column's distinct values.
    Select,
    /// Not filterable.
    #[default]
    None,
}

/// A table column definition.
///
/// Maps a header label to a record field path and a filter kind.
///
/// # Examples
///
/// ```
/// use roster_lib::column::{ColumnDef, FilterKind};
///
/// let columns = vec![
///     ColumnDef::new("EMPLOYEE NAME", "name").text_filter(),
///     ColumnDef::new("TEAM", "team_name").select_filter(),
///     ColumnDef::new("MANAGER", "related_people.manager[0]").select_filter(),
/// ];
/// assert_eq!(columns[2].id(), "related_people.manager[0]");
/// assert_eq!(columns[1].filter, FilterKind::Select);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column id. Defaults to the accessor path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    /// Header text.
    pub header: String,
    /// Path resolved against each record.
    pub accessor: AccessorPath,
    /// Filter kind.
    #[serde(default)]
    pub filter: FilterKind,
}

impl ColumnDef {
    /// Creates an unfilterable column.
    pub fn new(header: impl Into<String>, accessor: impl Into<AccessorPath>) -> Self {
        Self {
            id: None,
            header: header.into(),
            accessor: accessor.into(),
            filter: FilterKind::None,
        }
    }

    /// Overrides the column id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Makes the column filterable by text prefix.
    pub fn text_filter(mut self) -> Self {
        self.filter = FilterKind::Text;
        self
    }

    /// Makes the column filterable by selecting one of its values.
    pub fn select_filter(mut self) -> Self {
        self.filter = FilterKind::Select;
        self
    }

    /// Returns the column id.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(self.accessor.as_str())
    }

    /// Returns `true` if the column takes a filter.
    pub fn is_filterable(&self) -> bool {
        self.filter != FilterKind::None
    }
}

/// Checks that every column id is unique.
pub fn validate_columns(columns: &[ColumnDef]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.id()) {
            return Err(ConfigError::DuplicateColumnId {
                id: column.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Finds a column by id.
pub fn find_column<'a>(columns: &'a [ColumnDef], id: &str) -> Option<&'a ColumnDef> {
    columns.iter().find(|column| column.id() == id)
}
