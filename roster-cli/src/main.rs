mod cli;
mod commands;
mod display;
mod error;
mod executor;
mod load;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use roster_lib::column::ColumnDef;
use roster_lib::config::TableConfig;
use roster_lib::employee;
use roster_lib::sink::EntryMode;
use roster_lib::{RecordId, TableView};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::cli::Cli;
use crate::display::{OutputMode, render};
use crate::error::CliError;
use crate::executor::{CommandResult, execute};
use crate::load::{load_snapshot, read_json};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(level, Config::default(), File::create(&cli.log_file)?)?;

    let columns: Vec<ColumnDef> = match &cli.columns {
        Some(path) => read_json(path)?,
        None => employee::columns(),
    };
    let mut config: TableConfig = match &cli.config {
        Some(path) => read_json(path)?,
        None => TableConfig::default(),
    };
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size);
    }
    let snapshot = load_snapshot(&cli.records)?;

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Table
    };

    let mut table = TableView::new(columns, snapshot, config)?
        .with_selection_sink(move |ids: &[RecordId]| print_selected(ids, mode))
        .with_mode_switch(|entry: EntryMode| {
            println!("Handing off to {:?}; the selection so far is kept.", entry);
        });

    println!("{}", render(&table.view(), mode));
    repl(&mut table, mode)
}

fn repl(table: &mut TableView, mode: OutputMode) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("roster> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let cmd = match commands::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        log::debug!("Executing {:?}", cmd);

        match execute(table, cmd) {
            Ok(CommandResult::View) => println!("{}", render(&table.view(), mode)),
            Ok(CommandResult::Message(message)) => println!("{}", message),
            Ok(CommandResult::Options { column, options }) => {
                if options.is_empty() {
                    println!("'{}' has no options under the current filters", column);
                } else {
                    println!("{}: {}", column, options.join(", "));
                }
            }
            Ok(CommandResult::Selected(ids)) => print_selected(&ids, mode),
            Ok(CommandResult::Help) => println!("{}", commands::HELP),
            Ok(CommandResult::Exit) => break,
            Err(e) => {
                log::error!("{}", e);
                println!("Error: {}", e);
            }
        }
    }

    Ok(())
}

fn print_selected(ids: &[RecordId], mode: OutputMode) {
    match mode {
        OutputMode::Json => {
            println!("{}", serde_json::json!({ "selected": ids }));
        }
        OutputMode::Table => {
            let ids: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
            println!("selected: [{}]", ids.join(", "));
        }
    }
}
