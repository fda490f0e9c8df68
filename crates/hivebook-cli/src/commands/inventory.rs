//! Inventory commands.

use colored::Colorize;
use hivebook::{Hivebook, InventoryItem};

use super::CommandResult;
use crate::cli::InventoryCommand;

pub fn run(book: &mut Hivebook, command: InventoryCommand) -> CommandResult {
    match command {
        InventoryCommand::Show => {
            let inventory = book.state().inventory;
            for item in InventoryItem::ALL {
                println!("  {:<8} {}", item.key(), inventory.get(item).to_string().white().bold());
            }
        }
        InventoryCommand::Set { item, value } => {
            book.set_inventory(item, value);
            println!("{} {} = {}", "Set".green().bold(), item, value);
        }
        InventoryCommand::Adjust { item, delta } => {
            let value = book.adjust_inventory(item, delta);
            println!("{} {} = {}", "Adjusted".green().bold(), item, value);
        }
    }
    Ok(())
}
