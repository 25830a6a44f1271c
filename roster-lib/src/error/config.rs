//! Configuration validation errors

/// Error type for an invalid [`TableConfig`](crate::config::TableConfig) or column set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The default page size is zero.
    #[error("Page size must be at least 1")]
    ZeroPageSize,

    /// No page sizes are offered to the page size selector.
    #[error("At least one page size option is required")]
    EmptyPageSizeOptions,

    /// One of the page size options is zero.
    #[error("Page size options must all be at least 1")]
    ZeroPageSizeOption,

    /// Two columns resolve to the same id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumnId { id: String },
}
