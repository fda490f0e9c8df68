//! What an import did, for the status line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reconciled collection and how many incoming rows were counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged<T> {
    pub records: Vec<T>,
    pub count: usize,
}

/// Summary of a committed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// JSON document: number of apiaries and tasks it carried.
    Json { apiaries: usize, tasks: usize },
    /// Task CSV: rows matched by id or inserted.
    CsvTasks { count: usize },
    /// Apiary CSV: rows matched by id, by name, or inserted.
    CsvApiaries { count: usize },
    /// Inventory CSV.
    CsvInventory,
}

impl ImportOutcome {
    pub fn message(&self) -> String {
        match self {
            ImportOutcome::Json { apiaries, tasks } => {
                format!("Imported {} apiaries, {} tasks.", apiaries, tasks)
            }
            ImportOutcome::CsvTasks { count } => format!("Imported/merged {} tasks from CSV.", count),
            ImportOutcome::CsvApiaries { count } => {
                format!("Imported/merged {} apiaries from CSV.", count)
            }
            ImportOutcome::CsvInventory => "Inventory updated from CSV.".to_string(),
        }
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
