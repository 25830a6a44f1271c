//! Row filtering and select-option computation.

use std::collections::HashSet;

use crate::accessor::CellValue;
use crate::column::{ColumnDef, FilterKind};
use crate::record::Record;

use super::FilterState;

/// A single column's predicate, built from its filter kind and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-folded prefix match. Undefined values always pass.
    StartsWith(String),
    /// Exact match on the coerced value. Undefined values never match.
    Equals(String),
}

impl Predicate {
    /// Builds the predicate for a column, if the column is filterable.
    pub fn for_column(kind: FilterKind, value: &str) -> Option<Self> {
        match kind {
            FilterKind::Text => Some(Predicate::StartsWith(value.to_lowercase())),
            FilterKind::Select => Some(Predicate::Equals(value.to_string())),
            FilterKind::None => None,
        }
    }

    /// Tests a resolved cell value.
    pub fn matches(&self, value: &CellValue) -> bool {
        match (self, value.coerce()) {
            (Predicate::StartsWith(_), None) => true,
            (Predicate::StartsWith(prefix), Some(text)) => text.to_lowercase().starts_with(prefix),
            (Predicate::Equals(_), None) => false,
            (Predicate::Equals(expected), Some(text)) => &text == expected,
        }
    }
}

/// A predicate bound to the column it applies to.
#[derive(Debug, Clone)]
pub struct ColumnFilter<'c> {
    pub column: &'c ColumnDef,
    pub predicate: Predicate,
}

impl ColumnFilter<'_> {
    /// Tests a record against this column's predicate.
    pub fn accepts(&self, record: &Record) -> bool {
        self.predicate.matches(&record.resolve(&self.column.accessor))
    }
}

/// Builds the predicates for every active filter on a filterable column.
///
/// Filter values on unknown or unfilterable columns are ignored.
pub fn active_filters<'c>(columns: &'c [ColumnDef], filters: &FilterState) -> Vec<ColumnFilter<'c>> {
    columns
        .iter()
        .filter_map(|column| {
            let value = filters.get(column.id())?;
            let predicate = Predicate::for_column(column.filter, value)?;
            Some(ColumnFilter { column, predicate })
        })
        .collect()
}

/// Returns the records that pass every active filter, in snapshot order.
pub fn compute_filtered_rows<'r>(
    records: &'r [Record],
    columns: &[ColumnDef],
    filters: &FilterState,
) -> Vec<&'r Record> {
    let active = active_filters(columns, filters);
    log::trace!(
        "Filtering {} records with {} active predicates",
        records.len(),
        active.len()
    );
    apply(records, &active)
}

/// Returns the distinct values offered by a select filter.
///
/// Options come from the rows that pass every *other* column's filter, so a
/// column never eliminates its own choices. Undefined and null values are
/// skipped since their cells render empty. Each option appears once, and
/// order follows first appearance.
pub fn distinct_options(
    records: &[Record],
    columns: &[ColumnDef],
    filters: &FilterState,
    column: &ColumnDef,
) -> Vec<String> {
    let others: Vec<_> = active_filters(columns, filters)
        .into_iter()
        .filter(|f| f.column.id() != column.id())
        .collect();

    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for record in apply(records, &others) {
        let value = record.resolve(&column.accessor);
        if matches!(value, CellValue::Null) {
            continue;
        }
        if let Some(text) = value.coerce()
            && seen.insert(text.clone())
        {
            options.push(text);
        }
    }
    options
}

fn apply<'r>(records: &'r [Record], active: &[ColumnFilter<'_>]) -> Vec<&'r Record> {
    records
        .iter()
        .filter(|record| active.iter().all(|f| f.accepts(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(id: i64, name: &str, team: &str) -> Record {
        Record::new(id, json!({"id": id, "name": name, "team": team}))
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Name", "name").text_filter(),
            ColumnDef::new("Team", "team").select_filter(),
            ColumnDef::new("Id", "id"),
        ]
    }

    fn names(rows: &[&Record]) -> Vec<String> {
        rows.iter()
            .map(|r| r.data()["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_text_prefix_is_case_insensitive() {
        let records = vec![record(1, "Alice", "Eng"), record(2, "alice", "Eng"), record(3, "Bob", "Sales")];
        let mut filters = FilterState::new();
        filters.set("name", "AL");
        let rows = compute_filtered_rows(&records, &columns(), &filters);
        assert_eq!(names(&rows), vec!["Alice", "alice"]);
    }

    #[test]
    fn test_text_filter_passes_undefined() {
        let records = vec![
            Record::new(1, json!({"id": 1})),
            record(2, "Bob", "Eng"),
            record(3, "Carol", "Eng"),
        ];
        let mut filters = FilterState::new();
        filters.set("name", "b");
        let rows = compute_filtered_rows(&records, &columns(), &filters);
        let ids: Vec<_> = rows.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_select_filter_is_exact_and_skips_undefined() {
        let records = vec![
            record(1, "A", "Eng"),
            record(2, "B", "Engineering"),
            Record::new(3, json!({"id": 3, "name": "C"})),
        ];
        let mut filters = FilterState::new();
        filters.set("team", "Eng");
        let rows = compute_filtered_rows(&records, &columns(), &filters);
        assert_eq!(names(&rows), vec!["A"]);
    }

    #[test]
    fn test_select_matches_coerced_numbers() {
        let records = vec![
            Record::new(1, json!({"id": 1, "team": 10})),
            Record::new(2, json!({"id": 2, "team": "10"})),
            Record::new(3, json!({"id": 3, "team": 11})),
        ];
        let mut filters = FilterState::new();
        filters.set("team", "10");
        let rows = compute_filtered_rows(&records, &columns(), &filters);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_filters_on_unfilterable_or_unknown_columns_are_inert() {
        let records = vec![record(1, "A", "Eng"), record(2, "B", "Sales")];
        let mut filters = FilterState::new();
        filters.set("id", "1");
        filters.set("nope", "x");
        assert_eq!(compute_filtered_rows(&records, &columns(), &filters).len(), 2);
        assert!(active_filters(&columns(), &filters).is_empty());
    }

    #[test]
    fn test_conjunction_equals_independent_predicates() {
        let records = vec![
            record(1, "Alice", "Eng"),
            record(2, "Alan", "Sales"),
            record(3, "Bob", "Eng"),
            record(4, "Alma", "Eng"),
        ];
        let columns = columns();
        let mut filters = FilterState::new();
        filters.set("name", "al");
        filters.set("team", "Eng");

        let combined: Vec<_> = compute_filtered_rows(&records, &columns, &filters)
            .iter()
            .map(|r| r.id().clone())
            .collect();

        let active = active_filters(&columns, &filters);
        let independent: Vec<_> = records
            .iter()
            .filter(|r| active.iter().all(|f| f.accepts(r)))
            .map(|r| r.id().clone())
            .collect();

        assert_eq!(combined, independent);
        assert_eq!(combined.len(), 2);
        // Same inputs, same output
        assert_eq!(compute_filtered_rows(&records, &columns, &filters).len(), 2);
    }

    #[test]
    fn test_options_are_distinct_in_first_seen_order() {
        let records = vec![record(1, "A", "Eng"), record(2, "B", "Eng"), record(3, "C", "Sales")];
        let columns = columns();
        let options = distinct_options(&records, &columns, &FilterState::new(), &columns[1]);
        assert_eq!(options, vec!["Eng", "Sales"]);
    }

    #[test]
    fn test_options_skip_null_and_missing_values() {
        let records = vec![
            Record::new(1, json!({"id": 1, "team": null})),
            Record::new(2, json!({"id": 2})),
            record(3, "C", "Ada"),
        ];
        let columns = columns();
        let options = distinct_options(&records, &columns, &FilterState::new(), &columns[1]);
        assert_eq!(options, vec!["Ada"]);
    }

    #[test]
    fn test_integral_floats_offer_integer_options() {
        let records = vec![
            Record::new(1, json!({"id": 1, "team": 1.0})),
            Record::new(2, json!({"id": 2, "team": 2})),
            Record::new(3, json!({"id": 3, "team": 1})),
        ];
        let columns = columns();
        let options = distinct_options(&records, &columns, &FilterState::new(), &columns[1]);
        assert_eq!(options, vec!["1", "2"]);

        let mut filters = FilterState::new();
        filters.set("team", "1");
        assert_eq!(compute_filtered_rows(&records, &columns, &filters).len(), 2);
    }

    #[test]
    fn test_options_ignore_own_filter_but_honour_others() {
        let records = vec![
            record(1, "Alice", "Eng"),
            record(2, "Bob", "Sales"),
            record(3, "Alan", "Support"),
        ];
        let columns = columns();
        let mut filters = FilterState::new();
        filters.set("team", "Eng");
        filters.set("name", "al");

        let options = distinct_options(&records, &columns, &filters, &columns[1]);
        assert_eq!(options, vec!["Eng", "Support"]);
    }
}
