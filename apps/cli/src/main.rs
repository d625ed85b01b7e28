#![allow(clippy::print_stdout, clippy::unnecessary_wraps)]

pub mod args;
pub mod commands;

use crate::args::{Cli, Command};
use anyhow::Result;
use clap::Parser;
use telqr_logger::{LevelFilter, Logger};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(&cli)?;

    match cli.command {
        Command::Classify { user_agent, table } => commands::classify(&user_agent, table.into())?,
        Command::Extract { href } => commands::extract(&href)?,
        Command::Config { file } => commands::config(file.as_deref())?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<Logger> {
    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    let logger = match &cli.log_dir {
        Some(dir) => builder.path(dir).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
