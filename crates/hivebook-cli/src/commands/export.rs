//! Export command - write the JSON backup or the CSV bundle.

use colored::Colorize;
use hivebook::Hivebook;

use super::CommandResult;
use crate::cli::ExportCommand;

pub fn run(book: &Hivebook, command: ExportCommand) -> CommandResult {
    let written = match command {
        ExportCommand::Json { output } => vec![book.export_json(&output)?],
        ExportCommand::Csv { output } => book.export_csv(&output)?,
    };

    for path in written {
        println!("{} {}", "Wrote".green().bold(), path.display());
    }
    Ok(())
}
