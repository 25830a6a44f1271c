//! The table session: owns filter, pagination and selection state and is
//! the only way to mutate them.
//!
//! Every mutator runs to completion before returning: apply the change,
//! re-derive the filtered rows, re-clamp pagination and, if the selection
//! changed, emit the selection to the sink exactly once. Call
//! [`TableView::view`] afterwards to get the fresh view model.

use std::fmt;

use crate::column::{ColumnDef, FilterKind, find_column, validate_columns};
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::filter::{FilterState, compute_filtered_rows, distinct_options};
use crate::pagination::{PaginationState, paginate};
use crate::record::{Record, RecordId, Snapshot};
use crate::selection::Selection;
use crate::sink::{Discard, EntryMode, ModeSwitch, SelectionSink};
use crate::view::{ViewModel, build_view_model};

/// A filterable, paginated, multi-select view over a record snapshot.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use roster_lib::config::TableConfig;
/// use roster_lib::employee;
/// use roster_lib::record::{RecordId, Snapshot};
/// use roster_lib::table::TableView;
///
/// let snapshot = Snapshot::from_json_str(
///     r#"[{"id": 1, "name": "Ada", "team_name": "Eng"},
///         {"id": 2, "name": "Bob", "team_name": "Sales"}]"#,
/// )
/// .unwrap();
///
/// let reported = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&reported);
///
/// let mut table = TableView::new(employee::columns(), snapshot, TableConfig::default())
///     .unwrap()
///     .with_selection_sink(move |ids: &[RecordId]| *sink.borrow_mut() = ids.to_vec());
///
/// table.set_filter("team_name", "Eng");
/// table.toggle_all_on_page();
///
/// assert_eq!(*reported.borrow(), vec![RecordId::from("1")]);
/// assert_eq!(table.view().rows.len(), 1);
/// ```
pub struct TableView {
    config: TableConfig,
    columns: Vec<ColumnDef>,
    snapshot: Snapshot,
    filters: FilterState,
    pagination: PaginationState,
    selection: Selection,
    sink: Box<dyn SelectionSink>,
    mode_switch: Box<dyn ModeSwitch>,
}

impl fmt::Debug for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("records", &self.snapshot.len())
            .field("filters", &self.filters)
            .field("pagination", &self.pagination)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl TableView {
    /// Mounts a view with empty filters, an empty selection and the first page.
    ///
    /// The collaborators default to [`Discard`]; attach real ones with
    /// [`with_selection_sink`](Self::with_selection_sink) and
    /// [`with_mode_switch`](Self::with_mode_switch).
    pub fn new(
        columns: Vec<ColumnDef>,
        snapshot: Snapshot,
        config: TableConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_columns(&columns)?;

        log::debug!(
            "Mounting table with {} columns, {} records, page size {}",
            columns.len(),
            snapshot.len(),
            config.page_size
        );

        Ok(Self {
            pagination: PaginationState::new(config.page_size),
            config,
            columns,
            snapshot,
            filters: FilterState::new(),
            selection: Selection::new(),
            sink: Box::new(Discard),
            mode_switch: Box::new(Discard),
        })
    }

    /// Sets the callback that receives the selected ids after each change.
    pub fn with_selection_sink(mut self, sink: impl SelectionSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Sets the callback that receives workflow hand-offs.
    pub fn with_mode_switch(mut self, mode_switch: impl ModeSwitch + 'static) -> Self {
        self.mode_switch = Box::new(mode_switch);
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Builds the view model for the current state.
    pub fn view(&self) -> ViewModel {
        build_view_model(
            self.snapshot.records(),
            &self.columns,
            &self.filters,
            &self.pagination,
            &self.selection,
            &self.config.page_size_options,
        )
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the column definitions.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the active filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Returns the pagination state.
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Returns the selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Records passing every active filter, in snapshot order.
    pub fn filtered_rows(&self) -> Vec<&Record> {
        compute_filtered_rows(self.snapshot.records(), &self.columns, &self.filters)
    }

    /// Ids of the rows on the current page.
    pub fn page_ids(&self) -> Vec<RecordId> {
        let filtered = self.filtered_rows();
        paginate(&filtered, &self.pagination)
            .rows()
            .iter()
            .map(|record| record.id().clone())
            .collect()
    }

    /// Selected ids in snapshot order. This is what the sink receives.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selection.ordered(&self.snapshot)
    }

    /// True if the current page is non-empty and fully selected.
    pub fn is_all_on_page_selected(&self) -> bool {
        self.selection.is_all_selected(&self.page_ids())
    }

    /// True if some, but not all, rows on the current page are selected.
    pub fn is_partially_selected(&self) -> bool {
        self.selection.is_partially_selected(&self.page_ids())
    }

    /// Distinct options for a select column, or `None` if the column is not
    /// a select column.
    pub fn options(&self, column_id: &str) -> Option<Vec<String>> {
        let column = find_column(&self.columns, column_id)?;
        if column.filter != FilterKind::Select {
            return None;
        }
        Some(distinct_options(
            self.snapshot.records(),
            &self.columns,
            &self.filters,
            column,
        ))
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Sets a column filter. An empty value clears it.
    ///
    /// Filters on unknown or unfilterable columns are ignored. Returns `true`
    /// if the filter state changed.
    pub fn set_filter(&mut self, column_id: &str, value: impl Into<String>) -> bool {
        match find_column(&self.columns, column_id) {
            Some(column) if column.is_filterable() => {}
            Some(_) => {
                log::warn!("Ignoring filter on unfilterable column '{}'", column_id);
                return false;
            }
            None => {
                log::warn!("Ignoring filter on unknown column '{}'", column_id);
                return false;
            }
        }

        let value = value.into();
        if !self.filters.set(column_id, value.as_str()) {
            return false;
        }
        log::debug!("Filter '{}' set to {:?}", column_id, value);
        self.filters_changed();
        true
    }

    /// Removes a column filter. Returns `true` if one was removed.
    pub fn clear_filter(&mut self, column_id: &str) -> bool {
        if !self.filters.clear(column_id) {
            return false;
        }
        log::debug!("Filter '{}' cleared", column_id);
        self.filters_changed();
        true
    }

    /// Removes every filter. Returns `true` if any were removed.
    pub fn clear_filters(&mut self) -> bool {
        if !self.filters.clear_all() {
            return false;
        }
        log::debug!("All filters cleared");
        self.filters_changed();
        true
    }

    fn filters_changed(&mut self) {
        if self.config.reset_page_on_filter {
            self.pagination.reset();
        }
        self.reclamp();
    }

    fn reclamp(&mut self) {
        let total = self.filtered_rows().len();
        log::trace!("{} rows after filtering", total);
        self.pagination.clamp(total);
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Jumps to a page (zero-based), clamped into range.
    pub fn goto_page(&mut self, page_index: usize) -> bool {
        let total = self.filtered_rows().len();
        self.pagination.goto_page(page_index, total)
    }

    /// Moves to the next page. A no-op on the last page.
    pub fn next_page(&mut self) -> bool {
        let total = self.filtered_rows().len();
        self.pagination.next_page(total)
    }

    /// Moves to the previous page. A no-op on the first page.
    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous_page()
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) -> bool {
        self.pagination.first_page()
    }

    /// Moves to the last page.
    pub fn last_page(&mut self) -> bool {
        let total = self.filtered_rows().len();
        self.pagination.last_page(total)
    }

    /// Changes the page size, keeping the first visible row on screen.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let total = self.filtered_rows().len();
        self.pagination.set_page_size(page_size, total)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles one record. Ids missing from the snapshot are ignored.
    pub fn toggle_row(&mut self, id: &RecordId) -> bool {
        if !self.snapshot.contains(id) {
            log::warn!("Ignoring toggle of unknown record '{}'", id);
            return false;
        }
        let (added, removed) = self.selection.toggle(id);
        self.selection_changed(added.len(), removed.len())
    }

    /// Header-checkbox toggle for the current page.
    ///
    /// Deselects the page if it is fully selected, otherwise selects all of it.
    pub fn toggle_all_on_page(&mut self) -> bool {
        let ids = self.page_ids();
        let (added, removed) = self.selection.toggle_all(&ids);
        self.selection_changed(added.len(), removed.len())
    }

    /// Same as [`toggle_all_on_page`](Self::toggle_all_on_page), over every
    /// filtered row.
    pub fn toggle_all_filtered(&mut self) -> bool {
        let ids: Vec<RecordId> = self
            .filtered_rows()
            .iter()
            .map(|record| record.id().clone())
            .collect();
        let (added, removed) = self.selection.toggle_all(&ids);
        self.selection_changed(added.len(), removed.len())
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) -> bool {
        let removed = self.selection.clear();
        self.selection_changed(0, removed.len())
    }

    fn selection_changed(&mut self, added: usize, removed: usize) -> bool {
        if added == 0 && removed == 0 {
            return false;
        }
        log::debug!(
            "Selection changed: +{} -{} ({} selected)",
            added,
            removed,
            self.selection.len()
        );
        let ids = self.selected_ids();
        self.sink.selection_changed(&ids);
        true
    }

    // =========================================================================
    // Snapshot and hand-off
    // =========================================================================

    /// Replaces the record snapshot.
    ///
    /// Filters are kept. Selected ids that no longer exist are dropped, and
    /// the sink is told if that changed the selection. Pagination is
    /// re-clamped against the new filtered rows.
    pub fn replace_records(&mut self, snapshot: Snapshot) {
        log::debug!(
            "Replacing snapshot: {} -> {} records",
            self.snapshot.len(),
            snapshot.len()
        );
        self.snapshot = snapshot;

        let snapshot = &self.snapshot;
        let dropped = self.selection.retain(|id| snapshot.contains(id));
        if !dropped.is_empty() {
            log::warn!("Dropped {} selected ids missing from the new snapshot", dropped.len());
        }

        self.reclamp();
        self.selection_changed(0, dropped.len());
    }

    /// Hands off to the external import workflow.
    pub fn request_import(&mut self) {
        log::info!("Import requested");
        self.mode_switch.switch_mode(EntryMode::AddByImport);
    }
}
