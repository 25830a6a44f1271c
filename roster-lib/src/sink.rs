//! Outbound collaborators injected into a [`TableView`](crate::table::TableView).
//!
//! Both traits are implemented for plain closures, so a host can pass
//! `|ids: &[RecordId]| ...` directly.

use crate::record::RecordId;

/// Receives the full, ordered list of selected record ids after every
/// selection change.
pub trait SelectionSink {
    fn selection_changed(&mut self, selected: &[RecordId]);
}

impl<F> SelectionSink for F
where
    F: FnMut(&[RecordId]),
{
    fn selection_changed(&mut self, selected: &[RecordId]) {
        self(selected)
    }
}

/// Workflows the table can hand off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Add records by importing a file instead of picking existing ones.
    AddByImport,
}

/// Receives hand-off signals to external workflows.
pub trait ModeSwitch {
    fn switch_mode(&mut self, mode: EntryMode);
}

impl<F> ModeSwitch for F
where
    F: FnMut(EntryMode),
{
    fn switch_mode(&mut self, mode: EntryMode) {
        self(mode)
    }
}

/// A collaborator that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl SelectionSink for Discard {
    fn selection_changed(&mut self, _selected: &[RecordId]) {}
}

impl ModeSwitch for Discard {
    fn switch_mode(&mut self, _mode: EntryMode) {}
}
