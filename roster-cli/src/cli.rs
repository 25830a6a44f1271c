use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Browse, filter and select records from a JSON snapshot", long_about = None)]
pub struct Cli {
    /// JSON file holding an array of records, each with an `id`
    pub records: PathBuf,

    /// JSON file with column definitions (defaults to the employee columns)
    #[arg(short, long)]
    pub columns: Option<PathBuf>,

    /// JSON file with table settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rows per page, overrides the config file
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// Print the view model as JSON instead of a text table
    #[arg(long)]
    pub json: bool,

    /// Where log output goes
    #[arg(long, default_value = "roster.log")]
    pub log_file: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}
