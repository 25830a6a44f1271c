//! Tabular view engine
//!
//! Browses an in-memory snapshot of structured records: per-column filters,
//! pagination and an id-based multi-selection that is reported to an
//! injected sink. Rendering is left to the caller, which receives a
//! [`view::ViewModel`] and drives a [`table::TableView`].

pub mod accessor;
pub mod column;
pub mod config;
pub mod employee;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod selection;
pub mod sink;
pub mod table;
pub mod view;

pub use record::{Record, RecordId, Snapshot};
pub use table::TableView;
pub use view::ViewModel;
