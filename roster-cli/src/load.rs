use std::fs;
use std::path::Path;

use roster_lib::Snapshot;
use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a record snapshot from a JSON array file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, CliError> {
    let text = read(path)?;
    let snapshot = Snapshot::from_json_str(&text).map_err(|source| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded {} records from {}", snapshot.len(), path.display());
    Ok(snapshot)
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
