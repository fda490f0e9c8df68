//! Tasks scheduled against apiaries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    Done,
}

impl TaskStatus {
    /// Anything other than exactly `Done` is still to do.
    pub fn from_label(label: &str) -> Self {
        if label == "Done" {
            TaskStatus::Done
        } else {
            TaskStatus::ToDo
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Exact label match; anything else is `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Low" => Priority::Low,
            "High" => Priority::High,
            _ => Priority::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A unit of work, loosely linked to an apiary through `hive_id`.
///
/// Field order is the column order of `tasks.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Apiary id; may dangle.
    pub hive_id: String,
    pub due: NaiveDate,
    pub status: TaskStatus,
    pub priority: Priority,
}

impl Task {
    /// Natural key used to recognise a task re-imported without its id.
    ///
    /// `due` is the parsed date, so `2025-09-01` and `2025-09-01T08:00`
    /// give the same key. The raw CSV text is never compared.
    pub fn signature(&self) -> (String, String, NaiveDate) {
        (self.title.clone(), self.hive_id.clone(), self.due)
    }

    /// Still to do and due before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == TaskStatus::ToDo && self.due < today
    }
}
