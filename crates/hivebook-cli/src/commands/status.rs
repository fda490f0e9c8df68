//! Status command - dashboard totals and what is due.

use colored::Colorize;
use hivebook::{format_dmy, today, Hivebook};

use super::CommandResult;

/// Number of upcoming tasks shown in the human-readable view.
const UPCOMING: usize = 5;

pub fn run(book: &Hivebook, json_output: bool, verbose: bool) -> CommandResult {
    let state = book.state();
    let dashboard = state.dashboard();
    let today = today();

    if json_output {
        let status = serde_json::json!({
            "dashboard": dashboard,
            "apiaries": state.hives.len(),
            "tasks": {
                "toDo": dashboard.to_do,
                "done": state.done_tasks().len(),
                "overdue": state.todo_tasks().iter().filter(|t| t.is_overdue(today)).count(),
            },
            "inventory": state.inventory,
            "dataDir": book.config().data_dir,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Hivebook".cyan().bold());
    if verbose {
        println!("Data: {}", book.config().data_dir.display());
    }
    println!();

    println!("{}", "Hives:".yellow().bold());
    println!("  Total:     {}", dashboard.total_hives.to_string().white().bold());
    println!("  Singles:   {}", dashboard.singles);
    println!("  Doubles:   {}", dashboard.doubles);
    println!("  Nucs:      {}", dashboard.nucs);
    let queenless = dashboard.queenless_hives.to_string();
    if dashboard.queenless_hives > 0 {
        println!("  Queenless: {}", queenless.red());
    } else {
        println!("  Queenless: {}", queenless.green());
    }
    println!();

    let todos = state.todo_tasks();
    println!(
        "{} {}",
        "Tasks to do:".yellow().bold(),
        dashboard.to_do.to_string().white()
    );
    for task in todos.iter().take(UPCOMING) {
        let due = format_dmy(task.due);
        let due = if task.is_overdue(today) {
            due.red().to_string()
        } else {
            due
        };
        println!("  {}  {}  {} ({})", due, task.title, task.hive_id.dimmed(), task.priority);
    }
    if todos.len() > UPCOMING {
        println!("  {}", format!("... and {} more", todos.len() - UPCOMING).dimmed());
    }
    println!();

    let inventory = state.inventory;
    println!("{}", "Inventory:".yellow().bold());
    println!(
        "  Supers {}  Boxes {}  Feeders {}  Syrup {} L",
        inventory.supers, inventory.boxes, inventory.feeders, inventory.syrup_l
    );

    Ok(())
}
