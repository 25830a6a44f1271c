use std::io;
use std::path::PathBuf;

use roster_lib::error::{ConfigError, SnapshotError};

/// Errors that stop the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid records in {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: SnapshotError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
