//! Render-ready view model.
//!
//! [`build_view_model`] is a pure function of its inputs. It holds no state
//! and caches nothing, so it is simply called again after every mutation.

use serde::Serialize;

use crate::column::{ColumnDef, FilterKind};
use crate::filter::{FilterState, compute_filtered_rows, distinct_options};
use crate::pagination::{PaginationState, paginate};
use crate::record::{Record, RecordId};
use crate::selection::{CheckState, Selection};

/// Everything the presentation layer needs to draw the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub headers: Vec<HeaderView>,
    /// State of the "select all on this page" checkbox.
    pub page_checkbox: CheckState,
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
    /// Total selected records, including ones not on this page.
    pub selected_count: usize,
}

impl ViewModel {
    /// Ids of the rows on the current page.
    pub fn page_ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|row| row.id.clone()).collect()
    }

    /// Looks up a header by column id.
    pub fn header(&self, column_id: &str) -> Option<&HeaderView> {
        self.headers.iter().find(|h| h.column_id == column_id)
    }
}

/// A column header with its filter affordance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub column_id: String,
    pub header: String,
    pub filter: FilterControl,
}

/// The filter input shown in a header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterControl {
    None,
    Text {
        value: String,
        placeholder: String,
    },
    Select {
        /// Chosen option, `None` when the "all" entry is active.
        value: Option<String>,
        /// Label of the entry that clears the filter.
        all_label: String,
        options: Vec<String>,
    },
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: RecordId,
    /// Display text per column, in column order.
    pub cells: Vec<String>,
    pub selected: bool,
}

/// Paging affordances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub page_options: Vec<usize>,
    /// Page sizes offered to the page size selector.
    pub page_size_options: Vec<usize>,
    /// Rows passing the filters.
    pub filtered_rows: usize,
    /// Rows in the snapshot.
    pub total_records: usize,
    /// 1-based first and last row numbers shown.
    pub row_span: Option<(usize, usize)>,
}

/// Derives the view model from records, columns and the session state.
///
/// The pagination state is clamped against the filtered row count before the
/// page is cut, so a stale index never produces an out-of-range page.
pub fn build_view_model(
    records: &[Record],
    columns: &[ColumnDef],
    filters: &FilterState,
    pagination: &PaginationState,
    selection: &Selection,
    page_size_options: &[usize],
) -> ViewModel {
    let filtered = compute_filtered_rows(records, columns, filters);

    let mut pagination = *pagination;
    pagination.clamp(filtered.len());
    let page = paginate(&filtered, &pagination);

    let headers = columns
        .iter()
        .map(|column| HeaderView {
            column_id: column.id().to_string(),
            header: column.header.clone(),
            filter: filter_control(records, columns, filters, column),
        })
        .collect();

    let rows: Vec<RowView> = page
        .rows()
        .iter()
        .map(|record| RowView {
            id: record.id().clone(),
            cells: columns
                .iter()
                .map(|column| record.resolve(&column.accessor).display_text())
                .collect(),
            selected: selection.is_selected(record.id()),
        })
        .collect();

    let page_ids: Vec<RecordId> = rows.iter().map(|row| row.id.clone()).collect();

    ViewModel {
        headers,
        page_checkbox: selection.check_state(&page_ids),
        rows,
        pagination: PaginationView {
            page_index: page.page_index(),
            page_count: page.page_count(),
            page_size: page.page_size(),
            can_previous: page.can_previous(),
            can_next: page.can_next(),
            page_options: page.page_options(),
            page_size_options: page_size_options.to_vec(),
            filtered_rows: page.total_rows(),
            total_records: records.len(),
            row_span: page.row_span(),
        },
        selected_count: selection.len(),
    }
}

fn filter_control(
    records: &[Record],
    columns: &[ColumnDef],
    filters: &FilterState,
    column: &ColumnDef,
) -> FilterControl {
    let value = filters.get(column.id());
    match column.filter {
        FilterKind::None => FilterControl::None,
        FilterKind::Text => FilterControl::Text {
            value: value.unwrap_or_default().to_string(),
            placeholder: format!("Search with {}", column.header.to_lowercase()),
        },
        FilterKind::Select => FilterControl::Select {
            value: value.map(str::to_string),
            all_label: column.header.clone(),
            options: distinct_options(records, columns, filters, column),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SIZES: &[usize] = &[5, 10, 20];

    fn records() -> Vec<Record> {
        (1..=7i64)
            .map(|i| {
                let team = if i % 2 == 0 { "Eng" } else { "Sales" };
                Record::new(
                    i,
                    json!({"id": i, "name": format!("Person {i}"), "team_name": team}),
                )
            })
            .collect()
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("EMPLOYEE NAME", "name").text_filter(),
            ColumnDef::new("TEAM", "team_name").select_filter(),
            ColumnDef::new("NOTES", "notes"),
        ]
    }

    #[test]
    fn test_first_page() {
        let view = build_view_model(
            &records(),
            &columns(),
            &FilterState::new(),
            &PaginationState::new(5),
            &Selection::new(),
            SIZES,
        );

        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].cells, vec!["Person 1", "Sales", ""]);
        assert_eq!(view.pagination.page_count, 2);
        assert!(view.pagination.can_next);
        assert!(!view.pagination.can_previous);
        assert_eq!(view.pagination.row_span, Some((1, 5)));
        assert_eq!(view.pagination.page_size_options, vec![5, 10, 20]);
        assert_eq!(view.page_checkbox, CheckState::Unchecked);
    }

    #[test]
    fn test_header_affordances() {
        let mut filters = FilterState::new();
        filters.set("name", "per");
        filters.set("team_name", "Eng");
        let view = build_view_model(
            &records(),
            &columns(),
            &filters,
            &PaginationState::new(5),
            &Selection::new(),
            SIZES,
        );

        assert_eq!(
            view.header("name").map(|h| &h.filter),
            Some(&FilterControl::Text {
                value: "per".into(),
                placeholder: "Search with employee name".into(),
            })
        );
        assert_eq!(
            view.header("team_name").map(|h| &h.filter),
            Some(&FilterControl::Select {
                value: Some("Eng".into()),
                all_label: "TEAM".into(),
                options: vec!["Sales".into(), "Eng".into()],
            })
        );
        assert_eq!(view.header("notes").map(|h| &h.filter), Some(&FilterControl::None));
        assert_eq!(view.pagination.filtered_rows, 3);
        assert_eq!(view.pagination.total_records, 7);
    }

    #[test]
    fn test_stale_page_index_is_clamped() {
        let mut pagination = PaginationState::new(5);
        pagination.goto_page(1, 7);

        let mut filters = FilterState::new();
        filters.set("team_name", "Eng");
        let view = build_view_model(
            &records(),
            &columns(),
            &filters,
            &pagination,
            &Selection::new(),
            SIZES,
        );

        assert_eq!(view.pagination.page_index, 0);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_checkbox_states() {
        let mut selection = Selection::new();
        selection.toggle(&RecordId::from(2));
        let view = build_view_model(
            &records(),
            &columns(),
            &FilterState::new(),
            &PaginationState::new(5),
            &selection,
            SIZES,
        );
        assert_eq!(view.page_checkbox, CheckState::Indeterminate);
        assert!(view.rows[1].selected);
        assert!(!view.rows[0].selected);

        selection.select_all(&view.page_ids());
        let view = build_view_model(
            &records(),
            &columns(),
            &FilterState::new(),
            &PaginationState::new(5),
            &selection,
            SIZES,
        );
        assert_eq!(view.page_checkbox, CheckState::Checked);
        assert_eq!(view.selected_count, 5);
    }

    #[test]
    fn test_empty_result() {
        let mut filters = FilterState::new();
        filters.set("name", "zzz");
        let view = build_view_model(
            &records(),
            &columns(),
            &filters,
            &PaginationState::new(5),
            &Selection::new(),
            SIZES,
        );
        assert!(view.rows.is_empty());
        assert_eq!(view.pagination.page_count, 0);
        assert_eq!(view.pagination.row_span, None);
        assert_eq!(view.page_checkbox, CheckState::Unchecked);
    }

    #[test]
    fn test_serializes_to_json() {
        let view = build_view_model(
            &records(),
            &columns(),
            &FilterState::new(),
            &PaginationState::new(5),
            &Selection::new(),
            SIZES,
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["headers"][1]["filter"]["kind"], "select");
        assert_eq!(json["page_checkbox"], "unchecked");
        assert_eq!(json["rows"][0]["id"], "1");
    }
}
