//! Error types

mod config;
mod snapshot;

pub use config::*;
pub use snapshot::*;
