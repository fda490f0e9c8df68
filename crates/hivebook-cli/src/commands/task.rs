//! Task commands.

use colored::Colorize;
use hivebook::{format_dmy, today, Hivebook, Priority, Task, TaskDraft, TaskStatus};

use super::CommandResult;
use crate::cli::TaskCommand;

pub fn run(book: &mut Hivebook, command: TaskCommand) -> CommandResult {
    match command {
        TaskCommand::List { done, json } => {
            let state = book.state();
            let tasks = if done { state.done_tasks() } else { state.todo_tasks() };
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("{}", "No tasks.".dimmed());
            } else {
                let today = today();
                for task in tasks {
                    print_task(task, today);
                }
            }
            Ok(())
        }
        TaskCommand::Add {
            title,
            hive_id,
            due,
            priority,
        } => {
            if title.trim().is_empty() {
                return Err("Task title must not be empty".into());
            }
            let draft = TaskDraft::new(title, hive_id, due.unwrap_or_else(today))
                .with_priority(priority);
            let task = book.add_task(draft);
            println!("{} {} ({})", "Added".green().bold(), task.title, task.id);
            Ok(())
        }
        TaskCommand::Done { id } => {
            let task = book.set_task_status(&id, TaskStatus::Done)?;
            println!("{} {}", "Done:".green().bold(), task.title);
            Ok(())
        }
        TaskCommand::Undo { id } => {
            let task = book.set_task_status(&id, TaskStatus::ToDo)?;
            println!("{} {}", "Back to do:".yellow().bold(), task.title);
            Ok(())
        }
        TaskCommand::Snooze { id } => {
            let task = book.snooze_task(&id)?;
            println!(
                "{} {} until {}",
                "Snoozed".yellow().bold(),
                task.title,
                format_dmy(task.due)
            );
            Ok(())
        }
        TaskCommand::Delete { id } => {
            let task = book.delete_task(&id)?;
            println!("{} {}", "Deleted".green().bold(), task.title);
            Ok(())
        }
    }
}

fn print_task(task: &Task, today: chrono::NaiveDate) {
    let priority = match task.priority {
        Priority::High => task.priority.label().red(),
        Priority::Medium => task.priority.label().yellow(),
        Priority::Low => task.priority.label().normal(),
    };
    let due = format_dmy(task.due);
    let due = if task.status == TaskStatus::ToDo && task.is_overdue(today) {
        due.red().bold()
    } else {
        due.normal()
    };

    println!(
        "{}  {}  {}  {}  {}",
        task.id.cyan(),
        due,
        task.title.white().bold(),
        task.hive_id.dimmed(),
        priority
    );
}
