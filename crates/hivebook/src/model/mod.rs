//! Canonical record shapes: apiaries, tasks and the inventory counters.

mod apiary;
mod inventory;
mod task;

pub use apiary::{Apiary, QueenStatus, Strength};
pub use inventory::{Inventory, InventoryItem};
pub use task::{Priority, Task, TaskStatus};

use chrono::{Local, NaiveDate};

/// Today's calendar date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date as `dd/mm/yyyy` for display.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dmy() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
        assert_eq!(format_dmy(date), "05/09/2025");
    }
}
