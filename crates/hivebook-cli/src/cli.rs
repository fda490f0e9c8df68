//! CLI argument definitions using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hivebook::{InventoryItem, Priority, QueenStatus, Strength};

/// Hivebook: apiary, task and inventory records
#[derive(Parser)]
#[command(name = "hivebook")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the stored records
    #[arg(long, global = true, default_value = ".hivebook", env = "HIVEBOOK_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Reject CSV files with an unterminated quoted field
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dashboard totals and upcoming tasks
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage apiaries
    #[command(subcommand)]
    Apiary(ApiaryCommand),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage inventory counters
    #[command(subcommand)]
    Inventory(InventoryCommand),

    /// Merge a backup or CSV file into the records
    #[command(subcommand)]
    Import(ImportCommand),

    /// Write the records to files
    #[command(subcommand)]
    Export(ExportCommand),
}

/// Apiary form fields shared by `add` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct ApiaryFields {
    /// Total number of hives
    #[arg(long)]
    pub hives: Option<String>,

    /// Single-box hives
    #[arg(long)]
    pub single: Option<String>,

    /// Double-box hives
    #[arg(long)]
    pub double: Option<String>,

    /// Hives without a queen
    #[arg(long)]
    pub queenless: Option<String>,

    /// Nucleus colonies
    #[arg(long)]
    pub nucs: Option<String>,

    /// Queen status (Laying, Queenless)
    #[arg(long, value_parser = parse_queen_status)]
    pub queen: Option<QueenStatus>,

    /// Colony strength (Weak, Moderate, Strong)
    #[arg(long, value_parser = parse_strength)]
    pub strength: Option<Strength>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ApiaryCommand {
    /// List apiaries, optionally filtered by name or id
    List {
        /// Search text
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an apiary
    Add {
        /// Apiary name
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        fields: ApiaryFields,
    },

    /// Edit an apiary; omitted fields keep their value
    Edit {
        /// Apiary id
        #[arg(value_name = "ID")]
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ApiaryFields,
    },

    /// Delete one or more apiaries
    Delete {
        /// Apiary ids
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// List to-do tasks, earliest due first
    List {
        /// List completed tasks instead
        #[arg(long)]
        done: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a task
    Add {
        /// Task title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Apiary the task belongs to
        #[arg(long = "hive")]
        hive_id: String,

        /// Due date (YYYY-MM-DD, default today)
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Priority (Low, Medium, High)
        #[arg(long, value_parser = parse_priority, default_value = "Medium")]
        priority: Priority,
    },

    /// Mark a task done
    Done {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Move a task back to to-do
    Undo {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Push a task's due date to tomorrow
    Snooze {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete a task
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Show the counters
    Show,

    /// Set a counter
    Set {
        /// supers, boxes, feeders or syrupL
        #[arg(value_name = "ITEM")]
        item: InventoryItem,

        #[arg(value_name = "VALUE")]
        value: u32,
    },

    /// Add to or subtract from a counter; never drops below zero
    Adjust {
        /// supers, boxes, feeders or syrupL
        #[arg(value_name = "ITEM")]
        item: InventoryItem,

        /// Signed change, e.g. 5 or -2
        #[arg(value_name = "DELTA", allow_negative_numbers = true)]
        delta: i64,
    },
}

#[derive(Subcommand)]
pub enum ImportCommand {
    /// Merge a JSON backup
    Json {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Merge an apiaries, tasks or inventory CSV
    Csv {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Write the JSON backup
    Json {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Write apiaries.csv, tasks.csv and inventory.csv
    Csv {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

fn parse_queen_status(s: &str) -> Result<QueenStatus, String> {
    QueenStatus::from_label(s)
        .ok_or_else(|| format!("Unknown queen status: {}. Use Laying or Queenless.", s))
}

fn parse_strength(s: &str) -> Result<Strength, String> {
    Strength::from_label(s)
        .ok_or_else(|| format!("Unknown strength: {}. Use Weak, Moderate, or Strong.", s))
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    match s.to_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        _ => Err(format!("Unknown priority: {}. Use Low, Medium, or High.", s)),
    }
}
