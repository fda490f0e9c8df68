//! Import command - merge a JSON backup or CSV file into the records.

use colored::Colorize;
use hivebook::{Hivebook, ImportReport};

use super::CommandResult;
use crate::cli::ImportCommand;

pub fn run(book: &mut Hivebook, command: ImportCommand, verbose: bool) -> CommandResult {
    let report = match command {
        ImportCommand::Json { file } => book
            .import_json_file(&file)
            .map_err(|e| failure(e.json_import_message(), &e, verbose))?,
        ImportCommand::Csv { file } => book
            .import_csv_file(&file)
            .map_err(|e| failure(e.csv_import_message(), &e, verbose))?,
    };

    print_report(&report, verbose);
    Ok(())
}

fn failure(
    message: String,
    cause: &hivebook::HivebookError,
    verbose: bool,
) -> Box<dyn std::error::Error> {
    if verbose {
        format!("{} ({})", message, cause).into()
    } else {
        message.into()
    }
}

fn print_report(report: &ImportReport, verbose: bool) {
    println!("{}", report.message().green().bold());
    if verbose {
        println!("  File:   {}", report.source.path.display());
        println!("  Size:   {} bytes", report.source.size_bytes);
        println!("  Hash:   {}", report.source.hash.dimmed());
    }
}
