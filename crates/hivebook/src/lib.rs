//! Hivebook: record keeping for apiaries, tasks and inventory.
//!
//! Hivebook tracks apiaries (groups of hives), the tasks scheduled against
//! them and a handful of inventory counters. Its substance is in importing:
//! JSON backups and CSV files are reconciled with the existing records
//! without creating duplicates.
//!
//! # Core Principles
//!
//! - **Total coercion**: any incoming record becomes a usable entity
//! - **Identity continuity**: imports match by id, then by natural key
//! - **All or nothing**: an import is reconciled fully before it is committed
//!
//! # Example
//!
//! ```no_run
//! use hivebook::{Hivebook, HivebookConfig};
//!
//! let mut book = Hivebook::with_config(HivebookConfig::new().with_data_dir("bees")).unwrap();
//! let report = book.import_csv_file("apiaries.csv").unwrap();
//!
//! println!("{}", report.message());
//! println!("Total hives: {}", book.state().dashboard().total_hives);
//! ```

pub mod codec;
pub mod coerce;
pub mod error;
pub mod exchange;
pub mod merge;
pub mod model;
pub mod state;
pub mod storage;
pub mod validation;

mod hivebook;

pub use crate::hivebook::{Hivebook, HivebookConfig, DEFAULT_JSON_EXPORT};
pub use coerce::{parse_count, to_int};
pub use error::{HivebookError, Result};
pub use exchange::{CsvBundle, ExportDocument, ImportDocument, ImportReport, SourceMetadata};
pub use merge::{classify, CsvFormat, ImportOutcome};
pub use model::{
    format_dmy, today, Apiary, Inventory, InventoryItem, Priority, QueenStatus, Strength, Task,
    TaskStatus,
};
pub use state::{AppState, Dashboard, TaskDraft, TaskPatch};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use validation::{validate_apiary, ApiaryForm, ValidationReport};
