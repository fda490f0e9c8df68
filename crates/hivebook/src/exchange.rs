//! Import and export file formats, plus the file I/O they need.
//!
//! # JSON
//!
//! ```text
//! { "version": 1, "exportedAt": "...", "hives": [...], "tasks": [...], "inventory": {...} }
//! ```
//!
//! # CSV
//!
//! Three files: `apiaries.csv`, `tasks.csv` and `inventory.csv` (a single
//! data row). Import accepts any one of them and detects which by header.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::codec::encode;
use crate::error::{HivebookError, Result};
use crate::merge::ImportOutcome;
use crate::model::{Apiary, Inventory, Task};
use crate::state::AppState;

/// Current version of the JSON export format.
pub const EXPORT_VERSION: u32 = 1;

/// File names used for the CSV bundle.
pub const APIARIES_CSV: &str = "apiaries.csv";
pub const TASKS_CSV: &str = "tasks.csv";
pub const INVENTORY_CSV: &str = "inventory.csv";

/// The JSON backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub hives: Vec<Apiary>,
    pub tasks: Vec<Task>,
    pub inventory: Inventory,
}

impl ExportDocument {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            hives: state.hives.clone(),
            tasks: state.tasks.clone(),
            inventory: state.inventory,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A JSON document after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDocument {
    pub hives: Vec<Apiary>,
    pub tasks: Vec<Task>,
    pub inventory: Inventory,
}

impl ImportDocument {
    /// Parse and coerce a JSON document.
    ///
    /// Only the syntax can fail. `hives` and `tasks` that are absent or not
    /// arrays read as empty; a missing `inventory` reads as `{}`.
    pub fn parse(text: &str) -> Result<Self> {
        let json: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&json))
    }

    pub fn from_value(json: &Value) -> Self {
        let list = |key: &str| -> Vec<Value> {
            json.get(key)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };
        let inventory = json
            .get("inventory")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        Self {
            hives: list("hives").iter().map(Apiary::coerce).collect(),
            tasks: list("tasks").iter().map(Task::coerce).collect(),
            inventory: Inventory::coerce(&inventory),
        }
    }
}

/// Row layout of `inventory.csv`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct InventoryRow {
    boxes: u32,
    supers: u32,
    feeders: u32,
    #[serde(rename = "syrupL")]
    syrup_l: u32,
}

/// The three CSV export files, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvBundle {
    pub files: Vec<(String, String)>,
}

impl CsvBundle {
    pub fn from_state(state: &AppState) -> Result<Self> {
        let inventory = InventoryRow {
            boxes: state.inventory.boxes,
            supers: state.inventory.supers,
            feeders: state.inventory.feeders,
            syrup_l: state.inventory.syrup_l,
        };

        Ok(Self {
            files: vec![
                (APIARIES_CSV.to_string(), encode(&state.hives)?),
                (TASKS_CSV.to_string(), encode(&state.tasks)?),
                (INVENTORY_CSV.to_string(), encode(&[inventory])?),
            ],
        })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.as_str())
    }
}

/// Where an import came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    pub path: PathBuf,
    /// SHA-256 of the file contents.
    pub hash: String,
    pub size_bytes: u64,
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(path: &Path, contents: &[u8]) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(contents);

        Self {
            file,
            path: path.to_path_buf(),
            hash: format!("sha256:{:x}", hasher.finalize()),
            size_bytes: contents.len() as u64,
            read_at: Utc::now(),
        }
    }
}

/// A committed import and the file it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub source: SourceMetadata,
    pub outcome: ImportOutcome,
}

impl ImportReport {
    pub fn message(&self) -> String {
        self.outcome.message()
    }
}

/// Read a whole file as text.
pub fn read_text(path: impl AsRef<Path>) -> Result<(String, SourceMetadata)> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| HivebookError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source = SourceMetadata::new(path, &bytes);
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok((text, source))
}

/// Write `contents` as `dir/filename`, creating `dir` if needed.
pub fn write_download(dir: impl AsRef<Path>, filename: &str, contents: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let io_err = |path: &Path, e| HivebookError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    let path = dir.join(filename);
    fs::write(&path, contents).map_err(|e| io_err(&path, e))?;
    Ok(path)
}
