//! Table configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Settings for a [`TableView`](crate::table::TableView).
///
/// # Example
///
/// ```
/// use roster_lib::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_page_size(10)
///     .with_reset_page_on_filter(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page when the view is mounted.
    ///
    /// Default: 5
    pub page_size: usize,

    /// Page sizes offered to the page size selector.
    ///
    /// Default: 5, 10, 20, 30, 40, 50
    pub page_size_options: Vec<usize>,

    /// Return to the first page whenever a filter changes.
    ///
    /// When `false` the page index is only clamped into range.
    ///
    /// Default: false
    pub reset_page_on_filter: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![5, 10, 20, 30, 40, 50],
            reset_page_on_filter: false,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered to the selector.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Sets whether filter edits return to the first page.
    pub fn with_reset_page_on_filter(mut self, reset: bool) -> Self {
        self.reset_page_on_filter = reset;
        self
    }

    /// Checks the config for values the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.page_size_options.is_empty() {
            return Err(ConfigError::EmptyPageSizeOptions);
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::ZeroPageSizeOption);
        }
        Ok(())
    }
}
