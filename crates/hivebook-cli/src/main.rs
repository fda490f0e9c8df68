//! Hivebook CLI - apiary record keeping from the terminal.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use flexi_logger::{Logger, LoggerHandle};
use hivebook::{Hivebook, HivebookConfig};
use log::debug;

fn main() {
    let cli = Cli::parse();

    // Held for the whole run; dropping the handle stops the logger.
    let _logger = match init_logging(&cli) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::CommandResult {
    let config = HivebookConfig::new()
        .with_data_dir(&cli.data_dir)
        .with_strict_csv(cli.strict);
    debug!("opening records in {}", cli.data_dir.display());
    let mut book = Hivebook::with_config(config)?;

    match cli.command {
        Commands::Status { json } => commands::status::run(&book, json, cli.verbose),
        Commands::Apiary(cmd) => commands::apiary::run(&mut book, cmd),
        Commands::Task(cmd) => commands::task::run(&mut book, cmd),
        Commands::Inventory(cmd) => commands::inventory::run(&mut book, cmd),
        Commands::Import(cmd) => commands::import::run(&mut book, cmd, cli.verbose),
        Commands::Export(cmd) => commands::export::run(&book, cmd),
    }
}

/// Log to stderr; `--log-level` wins over `--verbose`.
fn init_logging(cli: &Cli) -> Result<LoggerHandle, Box<dyn std::error::Error>> {
    let level = match (&cli.log_level, cli.verbose) {
        (Some(level), _) => level.as_str(),
        (None, true) => "debug",
        (None, false) => "warn",
    };

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("invalid log level `{}`: {}", level, e))?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}
