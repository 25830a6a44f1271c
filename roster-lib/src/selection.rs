//! Selection state.
//!
//! Selection is tracked by record id, so it survives filtering, paging and
//! reloads that keep the record. Mutators report what changed as
//! `(added, removed)` id lists.

use std::collections::HashSet;

use serde::Serialize;

use crate::record::{RecordId, Snapshot};

/// Three-state checkbox value for a group of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    /// Some, but not all, rows in the group are selected.
    Indeterminate,
}

/// ID-based multi-selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<RecordId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle selection of an ID.
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &RecordId) -> (Vec<RecordId>, Vec<RecordId>) {
        if self.selected.remove(id) {
            (vec![], vec![id.clone()])
        } else {
            self.selected.insert(id.clone());
            (vec![id.clone()], vec![])
        }
    }

    /// Select every ID in `ids`.
    /// Returns the IDs that were newly selected.
    pub fn select_all(&mut self, ids: &[RecordId]) -> Vec<RecordId> {
        ids.iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .cloned()
            .collect()
    }

    /// Deselect every ID in `ids`.
    /// Returns the IDs that were deselected.
    pub fn deselect_all(&mut self, ids: &[RecordId]) -> Vec<RecordId> {
        ids.iter()
            .filter(|id| self.selected.remove(*id))
            .cloned()
            .collect()
    }

    /// Header-checkbox toggle for a group of rows.
    ///
    /// If every ID is already selected they are all deselected, otherwise all
    /// of them are selected. Returns (added, removed) IDs.
    pub fn toggle_all(&mut self, ids: &[RecordId]) -> (Vec<RecordId>, Vec<RecordId>) {
        if self.is_all_selected(ids) {
            (vec![], self.deselect_all(ids))
        } else {
            (self.select_all(ids), vec![])
        }
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RecordId> {
        self.selected.drain().collect()
    }

    /// Keep only the IDs for which `keep` returns true.
    /// Returns the IDs that were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&RecordId) -> bool) -> Vec<RecordId> {
        let dropped: Vec<_> = self.selected.iter().filter(|id| !keep(*id)).cloned().collect();
        for id in &dropped {
            self.selected.remove(id);
        }
        dropped
    }

    /// True if `ids` is non-empty and every one of them is selected.
    pub fn is_all_selected(&self, ids: &[RecordId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// True if some, but not all, of `ids` are selected.
    pub fn is_partially_selected(&self, ids: &[RecordId]) -> bool {
        let hits = ids.iter().filter(|id| self.selected.contains(*id)).count();
        hits > 0 && hits < ids.len()
    }

    /// Checkbox state for a group of rows.
    pub fn check_state(&self, ids: &[RecordId]) -> CheckState {
        if self.is_all_selected(ids) {
            CheckState::Checked
        } else if self.is_partially_selected(ids) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Get all selected IDs in snapshot order.
    ///
    /// IDs the snapshot does not know sort last, by value.
    pub fn ordered(&self, snapshot: &Snapshot) -> Vec<RecordId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort_by(|a, b| {
            let pa = snapshot.position(a).unwrap_or(usize::MAX);
            let pb = snapshot.position(b).unwrap_or(usize::MAX);
            pa.cmp(&pb).then_with(|| a.cmp(b))
        });
        ids
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::Record;

    fn ids(raw: &[i32]) -> Vec<RecordId> {
        raw.iter().map(|&id| RecordId::from(id)).collect()
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        let id = RecordId::from("7");

        let (added, removed) = selection.toggle(&id);
        assert_eq!(added, vec![id.clone()]);
        assert!(removed.is_empty());
        assert!(selection.is_selected(&id));

        let (added, removed) = selection.toggle(&id);
        assert!(added.is_empty());
        assert_eq!(removed, vec![id.clone()]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_indeterminate_page() {
        let page = ids(&[1, 2, 3]);
        let mut selection = Selection::new();
        selection.toggle(&page[0]);

        assert!(selection.is_partially_selected(&page));
        assert!(!selection.is_all_selected(&page));
        assert_eq!(selection.check_state(&page), CheckState::Indeterminate);

        let (added, removed) = selection.toggle_all(&page);
        assert_eq!(added, ids(&[2, 3]));
        assert!(removed.is_empty());
        assert!(selection.is_all_selected(&page));
        assert_eq!(selection.check_state(&page), CheckState::Checked);

        let (added, removed) = selection.toggle_all(&page);
        assert!(added.is_empty());
        assert_eq!(removed, page);
        assert!(selection.is_empty());
        assert_eq!(selection.check_state(&page), CheckState::Unchecked);
    }

    #[test]
    fn test_empty_group() {
        let mut selection = Selection::new();
        assert!(!selection.is_all_selected(&[]));
        assert!(!selection.is_partially_selected(&[]));
        assert_eq!(selection.check_state(&[]), CheckState::Unchecked);
        assert_eq!(selection.toggle_all(&[]), (vec![], vec![]));
    }

    #[test]
    fn test_toggle_all_leaves_other_rows_alone() {
        let mut selection = Selection::new();
        selection.toggle(&RecordId::from(9));
        selection.toggle_all(&ids(&[1, 2]));
        selection.toggle_all(&ids(&[1, 2]));
        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected(&RecordId::from(9)));
    }

    #[test]
    fn test_retain_and_clear() {
        let mut selection = Selection::new();
        selection.select_all(&ids(&[1, 2, 3]));
        let dropped = selection.retain(|id| id.as_str() != "2");
        assert_eq!(dropped, ids(&[2]));
        assert_eq!(selection.len(), 2);

        let mut cleared = selection.clear();
        cleared.sort();
        assert_eq!(cleared, ids(&[1, 3]));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_ordered_follows_snapshot() {
        let snapshot = Snapshot::from_records(vec![
            Record::new("c", json!({})),
            Record::new("a", json!({})),
            Record::new("b", json!({})),
        ])
        .unwrap();

        let mut selection = Selection::new();
        for id in ["b", "zz", "c"] {
            selection.toggle(&RecordId::from(id));
        }

        let ordered: Vec<_> = selection.ordered(&snapshot);
        assert_eq!(
            ordered,
            vec![RecordId::from("c"), RecordId::from("b"), RecordId::from("zz")]
        );
    }
}
