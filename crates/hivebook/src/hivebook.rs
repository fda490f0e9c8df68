//! Main Hivebook struct and public API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

use crate::codec::{decode_with, DecodeOptions};
use crate::error::{HivebookError, Result};
use crate::exchange::{
    read_text, write_download, CsvBundle, ExportDocument, ImportDocument, ImportReport,
};
use crate::model::{Apiary, InventoryItem, Task, TaskStatus};
use crate::state::{AppState, TaskDraft, TaskPatch};
use crate::storage::{load_state, save_state, FileStorage, Storage};
use crate::validation::ApiaryForm;

/// Default file name of the JSON backup.
pub const DEFAULT_JSON_EXPORT: &str = "beekeeping-backup.json";

/// Configuration for a Hivebook instance.
#[derive(Debug, Clone)]
pub struct HivebookConfig {
    /// Directory holding the stored collections.
    pub data_dir: PathBuf,
    /// Reject CSV input with an unterminated quoted field.
    pub strict_csv: bool,
    /// File name used for JSON exports.
    pub json_export_name: String,
}

impl Default for HivebookConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".hivebook"),
            strict_csv: false,
            json_export_name: DEFAULT_JSON_EXPORT.to_string(),
        }
    }
}

impl HivebookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_strict_csv(mut self, strict: bool) -> Self {
        self.strict_csv = strict;
        self
    }

    pub fn with_json_export_name(mut self, name: impl Into<String>) -> Self {
        self.json_export_name = name.into();
        self
    }

    /// Reject settings that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.json_export_name.trim().is_empty() {
            return Err(HivebookError::Config(
                "JSON export file name must not be empty".to_string(),
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(HivebookError::Config("data directory must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Application state bound to a store; every mutation is persisted.
pub struct Hivebook {
    config: HivebookConfig,
    storage: Arc<dyn Storage>,
    state: AppState,
}

impl Hivebook {
    /// Open the file store named by the default configuration.
    pub fn open() -> Result<Self> {
        Self::with_config(HivebookConfig::default())
    }

    /// Open the file store named by `config`.
    pub fn with_config(config: HivebookConfig) -> Result<Self> {
        config.validate()?;
        let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
        Ok(Self::with_storage(config, storage))
    }

    /// Restore state from an arbitrary store.
    pub fn with_storage(config: HivebookConfig, storage: Arc<dyn Storage>) -> Self {
        let state = load_state(storage.as_ref());
        Self {
            config,
            storage,
            state,
        }
    }

    pub fn config(&self) -> &HivebookConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn persist(&self) {
        save_state(self.storage.as_ref(), &self.state);
    }

    /// Run a mutation and persist afterwards, whatever it returned.
    fn mutate<T>(&mut self, f: impl FnOnce(&mut AppState) -> T) -> T {
        let result = f(&mut self.state);
        self.persist();
        result
    }

    // Apiaries

    pub fn add_apiary(&mut self, form: &ApiaryForm) -> Result<Apiary> {
        self.mutate(|s| s.add_apiary(form).cloned())
    }

    pub fn edit_apiary(&mut self, id: &str, form: &ApiaryForm) -> Result<Apiary> {
        self.mutate(|s| s.edit_apiary(id, form).cloned())
    }

    pub fn delete_apiaries<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        self.mutate(|s| s.delete_apiaries(ids))
    }

    // Tasks

    pub fn add_task(&mut self, draft: TaskDraft) -> Task {
        self.mutate(|s| s.add_task(draft).clone())
    }

    pub fn set_task_status(&mut self, id: &str, status: TaskStatus) -> Result<Task> {
        self.mutate(|s| s.set_task_status(id, status).cloned())
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.mutate(|s| s.update_task(id, patch).cloned())
    }

    pub fn snooze_task(&mut self, id: &str) -> Result<Task> {
        self.mutate(|s| s.snooze_task(id).cloned())
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        self.mutate(|s| s.delete_task(id))
    }

    // Inventory

    pub fn set_inventory(&mut self, item: InventoryItem, value: u32) {
        self.mutate(|s| s.set_inventory(item, value))
    }

    pub fn adjust_inventory(&mut self, item: InventoryItem, delta: i64) -> u32 {
        self.mutate(|s| s.adjust_inventory(item, delta))
    }

    // Import

    /// Merge a JSON backup file into the current state.
    pub fn import_json_file(&mut self, path: impl AsRef<Path>) -> Result<ImportReport> {
        let (text, source) = read_text(path)?;
        let doc = ImportDocument::parse(&text)?;
        let outcome = self.mutate(|s| s.apply_json_import(&doc));
        info!("imported {} ({})", source.file, source.hash);
        Ok(ImportReport { source, outcome })
    }

    /// Merge a CSV file (apiaries, tasks or inventory) into the current state.
    pub fn import_csv_file(&mut self, path: impl AsRef<Path>) -> Result<ImportReport> {
        let (text, source) = read_text(path)?;
        let options = DecodeOptions {
            strict: self.config.strict_csv,
        };
        let rows = decode_with(&text, &options)?;
        let outcome = self.state.apply_csv_import(&rows)?;
        self.persist();
        info!("imported {} ({})", source.file, source.hash);
        Ok(ImportReport { source, outcome })
    }

    // Export

    /// Write the JSON backup into `dir`.
    pub fn export_json(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let json = ExportDocument::from_state(&self.state).to_json()?;
        let path = write_download(dir, &self.config.json_export_name, json.as_bytes())?;
        info!("exported {}", path.display());
        Ok(path)
    }

    /// Write `apiaries.csv`, `tasks.csv` and `inventory.csv` into `dir`.
    pub fn export_csv(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let bundle = CsvBundle::from_state(&self.state)?;
        let mut written = Vec::with_capacity(bundle.files.len());
        for (name, text) in &bundle.files {
            written.push(write_download(dir, name, text.as_bytes())?);
        }
        info!("exported {} CSV files to {}", written.len(), dir.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, HIVES_KEY};

    #[test]
    fn test_config_builder() {
        let config = HivebookConfig::new()
            .with_data_dir("/tmp/bees")
            .with_strict_csv(true)
            .with_json_export_name("backup.json");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/bees"));
        assert!(config.strict_csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_export_name() {
        let config = HivebookConfig::new().with_json_export_name(" ");
        assert!(matches!(config.validate(), Err(HivebookError::Config(_))));
    }

    #[test]
    fn test_mutations_are_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let mut book = Hivebook::with_storage(HivebookConfig::default(), storage.clone());

        book.delete_apiaries(&["A-001"]);
        assert!(storage.read(HIVES_KEY).is_some());

        let reopened = Hivebook::with_storage(HivebookConfig::default(), storage);
        assert_eq!(reopened.state().hives.len(), 2);
    }
}
