use roster_lib::ViewModel;
use roster_lib::selection::CheckState;
use roster_lib::view::{FilterControl, HeaderView};
use unicode_width::UnicodeWidthStr;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

/// Renders the view model for the terminal.
pub fn render(view: &ViewModel, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(view)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}")),
        OutputMode::Table => render_table(view),
    }
}

fn render_table(view: &ViewModel) -> String {
    let mut lines: Vec<Vec<String>> = Vec::with_capacity(view.rows.len() + 1);

    let mut header = vec![checkbox(view.page_checkbox).to_string()];
    header.extend(view.headers.iter().map(header_label));
    lines.push(header);

    for row in &view.rows {
        let mut line = vec![if row.selected { "[x]" } else { "[ ]" }.to_string()];
        line.extend(row.cells.iter().cloned());
        lines.push(line);
    }

    let columns = lines.first().map(Vec::len).unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            lines
                .iter()
                .filter_map(|line| line.get(col))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (index, line) in lines.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad(cell, width))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');

        if index == 0 {
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }

    if view.rows.is_empty() {
        out.push_str("(no matching records)\n");
    }

    out.push_str(&footer(view));
    out
}

fn header_label(header: &HeaderView) -> String {
    match &header.filter {
        FilterControl::Text { value, .. } if !value.is_empty() => {
            format!("{} ~{}", header.header, value)
        }
        FilterControl::Select {
            value: Some(value), ..
        } => format!("{} ={}", header.header, value),
        _ => header.header.clone(),
    }
}

fn footer(view: &ViewModel) -> String {
    let p = &view.pagination;
    let page = if p.page_count == 0 {
        "Page 0 of 0".to_string()
    } else {
        format!("Page {} of {}", p.page_index + 1, p.page_count)
    };
    let span = match p.row_span {
        Some((first, last)) => format!("rows {first}-{last} of {}", p.filtered_rows),
        None => format!("0 of {} rows", p.filtered_rows),
    };
    let mut nav = Vec::new();
    if p.can_previous {
        nav.push("prev");
    }
    if p.can_next {
        nav.push("next");
    }
    let sizes: Vec<String> = p.page_size_options.iter().map(usize::to_string).collect();
    format!(
        "{page} | {span} ({} records) | {} per page ({}) | {} selected{}",
        p.total_records,
        p.page_size,
        sizes.join("/"),
        view.selected_count,
        if nav.is_empty() {
            String::new()
        } else {
            format!(" | {}", nav.join(", "))
        }
    )
}

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use roster_lib::TableView;
    use roster_lib::config::TableConfig;
    use roster_lib::employee;
    use roster_lib::record::{RecordId, Snapshot};

    use super::*;

    fn table() -> TableView {
        let snapshot = Snapshot::from_json_str(
            r#"[
                {"id": 1, "name": "Ada", "team_name": "Eng", "position": "Lead",
                 "related_people": {"manager": ["Grace"]}},
                {"id": 2, "name": "Bob", "team_name": "Sales", "position": "Rep",
                 "related_people": {"manager": []}}
            ]"#,
        )
        .unwrap();
        TableView::new(employee::columns(), snapshot, TableConfig::default()).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let mut table = table();
        table.toggle_row(&RecordId::from(1));
        let out = render(&table.view(), OutputMode::Table);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("[-] | EMPLOYEE NAME | TEAM"));
        assert!(lines[1].starts_with("----+-"));
        assert!(lines[2].starts_with("[x] | Ada"));
        assert!(lines[2].ends_with("Grace"));
        assert!(lines[3].starts_with("[ ] | Bob"));
        assert_eq!(
            lines[4],
            "Page 1 of 1 | rows 1-2 of 2 (2 records) | 5 per page (5/10/20/30/40/50) | 1 selected"
        );
    }

    #[test]
    fn test_filter_markers_and_empty_page() {
        let mut table = table();
        table.set_filter("name", "zz");
        table.set_filter("team_name", "Eng");
        let out = render(&table.view(), OutputMode::Table);

        assert!(out.contains("EMPLOYEE NAME ~zz"));
        assert!(out.contains("TEAM =Eng"));
        assert!(out.contains("(no matching records)"));
        assert!(out.contains("Page 0 of 0 | 0 of 0 rows"));
    }

    #[test]
    fn test_json_mode() {
        let out = render(&table().view(), OutputMode::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["pagination"]["page_count"], 1);
        assert_eq!(
            value["pagination"]["page_size_options"],
            serde_json::json!([5, 10, 20, 30, 40, 50])
        );
    }
}
