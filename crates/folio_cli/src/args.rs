use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Inspect and statically render a portfolio catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// trace|debug|info|warn|error
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Directory for rolling log files; file logging is off without it.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the filter bar in display order.
    Tags {
        #[arg(long)]
        entries: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render the catalog page as static HTML.
    Render {
        #[arg(long)]
        entries: PathBuf,

        /// Tag token to filter by; `all` when omitted.
        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the core version.
    Version,
}
