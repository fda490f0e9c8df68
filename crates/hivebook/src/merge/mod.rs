//! Reconciliation of imported records with the existing collections.
//!
//! Every function here is pure: it takes the current records and the
//! incoming batch and returns the reconciled records. Callers commit the
//! result in one step, so a failed import never leaves a half-merged
//! collection behind.
//!
//! Two policies exist:
//!
//! - **JSON** documents overwrite by id only. A record with an unknown id
//!   is always inserted, even if its name matches an existing one.
//! - **CSV** rows fall back to a natural key when the id does not match:
//!   `(title, hiveId, due)` for tasks and the case-insensitive name for
//!   apiaries.

mod classify;
mod from_csv;
mod from_json;
mod outcome;

pub use classify::{classify, CsvFormat};
pub use from_csv::{merge_apiary_rows, merge_inventory_row, merge_task_rows, plan_csv_import, CsvImport};
pub use from_json::merge_by_id;
pub use outcome::{ImportOutcome, Merged};

use crate::model::{Apiary, Task};

/// Records with a stable string identity.
pub trait Keyed {
    fn id(&self) -> &str;
}

impl Keyed for Apiary {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for Task {
    fn id(&self) -> &str {
        &self.id
    }
}
