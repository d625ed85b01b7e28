//! # CLI Argument Definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use telqr::domain::SignatureTable;

#[derive(Debug, Parser)]
#[command(name = "telqr")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect how TelQr classifies runtimes and reads tel: links")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to rolling files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a browser identification (user agent) string as mobile or desktop
    Classify {
        /// The identification string, e.g. a User-Agent header value
        user_agent: String,

        /// Signature table to match against
        #[arg(long, value_enum, default_value_t = Table::Legacy)]
        table: Table,
    },
    /// Print the phone number carried by a tel: link
    Extract {
        /// Link destination, e.g. "tel:+1 555 0100"
        href: String,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Configuration file (TOML, JSON or YAML); TELQR__* variables apply on top
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Table {
    Legacy,
    Modern,
}

impl From<Table> for SignatureTable {
    fn from(table: Table) -> Self {
        match table {
            Table::Legacy => Self::Legacy,
            Table::Modern => Self::Modern,
        }
    }
}
