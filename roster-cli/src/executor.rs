use roster_lib::column::{FilterKind, find_column};
use roster_lib::{RecordId, TableView};

use crate::commands::Command;
use crate::error::CliError;
use crate::load::load_snapshot;

/// Structured result from executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// The table changed (or was asked for) and should be redrawn.
    View,
    /// Nothing to redraw; tell the user why.
    Message(String),
    /// Choices of a select column.
    Options { column: String, options: Vec<String> },
    /// Current selection in snapshot order.
    Selected(Vec<RecordId>),
    Help,
    Exit,
}

/// Execute a parsed command against the table.
///
/// Only `reload` touches the filesystem, so it is the only command that can fail.
pub fn execute(table: &mut TableView, cmd: Command) -> Result<CommandResult, CliError> {
    let result = match cmd {
        Command::Show => CommandResult::View,
        Command::Filter { column, value } => exec_filter(table, &column, value),
        Command::Clear { column } => changed(
            table.clear_filter(&column),
            format!("No filter set on '{column}'"),
        ),
        Command::ClearFilters => changed(table.clear_filters(), "No filters set"),
        Command::Options { column } => match table.options(&column) {
            Some(options) => CommandResult::Options { column, options },
            None => CommandResult::Message(format!("'{column}' is not a select column")),
        },
        Command::Next => changed(table.next_page(), "Already on the last page"),
        Command::Prev => changed(table.previous_page(), "Already on the first page"),
        Command::First => changed(table.first_page(), "Already on the first page"),
        Command::Last => changed(table.last_page(), "Already on the last page"),
        Command::Page(index) => changed(
            table.goto_page(index),
            format!("Page {} is already shown", table.pagination().page_index() + 1),
        ),
        Command::Size(size) => changed(
            table.set_page_size(size),
            format!("Page size is already {}", table.pagination().page_size()),
        ),
        Command::Toggle(id) => {
            if table.snapshot().contains(&id) {
                table.toggle_row(&id);
                CommandResult::View
            } else {
                CommandResult::Message(format!("No record with id '{id}'"))
            }
        }
        Command::TogglePage => changed(table.toggle_all_on_page(), "Nothing on this page"),
        Command::ToggleAll => changed(table.toggle_all_filtered(), "No rows match the filters"),
        Command::SelectNone => changed(table.clear_selection(), "Nothing is selected"),
        Command::Selected => CommandResult::Selected(table.selected_ids()),
        Command::Reload(path) => {
            let snapshot = load_snapshot(&path)?;
            table.replace_records(snapshot);
            CommandResult::View
        }
        Command::Import => {
            table.request_import();
            CommandResult::Message("Switched to import mode".to_string())
        }
        Command::Help => CommandResult::Help,
        Command::Quit => CommandResult::Exit,
    };
    Ok(result)
}

fn exec_filter(table: &mut TableView, column: &str, value: String) -> CommandResult {
    match find_column(table.columns(), column) {
        None => return CommandResult::Message(format!("Unknown column '{column}'")),
        Some(def) if def.filter == FilterKind::None => {
            return CommandResult::Message(format!("'{column}' cannot be filtered"));
        }
        Some(_) => {}
    }
    changed(table.set_filter(column, value), "Filter unchanged")
}

fn changed(changed: bool, otherwise: impl Into<String>) -> CommandResult {
    if changed {
        CommandResult::View
    } else {
        CommandResult::Message(otherwise.into())
    }
}
