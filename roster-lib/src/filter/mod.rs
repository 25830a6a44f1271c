//! Column filters: per-column predicates combined by logical AND.

mod engine;
mod state;

pub use engine::*;
pub use state::*;
