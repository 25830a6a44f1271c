use std::path::PathBuf;

use roster_lib::RecordId;

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Filter { column: String, value: String },
    Clear { column: String },
    ClearFilters,
    Options { column: String },
    Next,
    Prev,
    First,
    Last,
    /// Zero-based page index.
    Page(usize),
    Size(usize),
    Toggle(RecordId),
    TogglePage,
    ToggleAll,
    SelectNone,
    Selected,
    Reload(PathBuf),
    Import,
    Help,
    Quit,
}

/// Error produced when a command line cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{value}' is not a valid {what}")]
    InvalidNumber { value: String, what: &'static str },
}

pub const HELP: &str = "\
Commands:
  show                       Redraw the table
  filter <column> <value>    Set a column filter (text prefix or exact option)
  clear <column>             Remove a column filter
  clear-filters              Remove every filter
  options <column>           List the choices of a select column
  next | prev | first | last Move between pages
  page <n>                   Jump to page n (1-based)
  size <n>                   Rows per page
  toggle <id>                Select or deselect a record
  toggle-page                Select or deselect every row on this page
  toggle-all                 Select or deselect every filtered row
  select-none                Clear the selection
  selected                   Print the selected ids
  reload <file>              Replace the records with another JSON file
  import                     Hand off to the import workflow
  help                       Show this help
  quit                       Exit";

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "show" | "ls" => Command::Show,
        "filter" | "f" => {
            let (column, value) = match rest.split_once(char::is_whitespace) {
                Some((column, value)) => (column, value.trim()),
                None => (rest, ""),
            };
            Command::Filter {
                column: required(column, "filter", "a column id")?,
                value: value.to_string(),
            }
        }
        "clear" => Command::Clear {
            column: required(rest, "clear", "a column id")?,
        },
        "clear-filters" => Command::ClearFilters,
        "options" => Command::Options {
            column: required(rest, "options", "a column id")?,
        },
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "first" => Command::First,
        "last" => Command::Last,
        "page" => {
            let page = number(rest, "page", "page number")?;
            if page == 0 {
                return Err(ParseError::InvalidNumber {
                    value: rest.to_string(),
                    what: "page number",
                });
            }
            Command::Page(page - 1)
        }
        "size" => Command::Size(number(rest, "size", "page size")?),
        "toggle" | "t" => Command::Toggle(RecordId::new(required(rest, "toggle", "a record id")?)),
        "toggle-page" => Command::TogglePage,
        "toggle-all" => Command::ToggleAll,
        "select-none" => Command::SelectNone,
        "selected" => Command::Selected,
        "reload" => Command::Reload(PathBuf::from(required(rest, "reload", "a file path")?)),
        "import" => Command::Import,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn required(
    value: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ParseError> {
    if value.is_empty() {
        Err(ParseError::MissingArgument { command, argument })
    } else {
        Ok(value.to_string())
    }
}

fn number(value: &str, command: &'static str, what: &'static str) -> Result<usize, ParseError> {
    if value.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            argument: "a number",
        });
    }
    value.parse().map_err(|_| ParseError::InvalidNumber {
        value: value.to_string(),
        what,
    })
}
