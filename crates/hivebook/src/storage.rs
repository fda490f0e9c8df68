//! Key-value persistence for the application state.
//!
//! Storage is best effort. Reads fall back to a default when an entry is
//! missing or unreadable, and failed writes are logged and dropped; the
//! in-memory state stays authoritative until the next successful write.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::{seed_hives, seed_inventory, seed_tasks, AppState};

/// Storage key for the apiary collection.
pub const HIVES_KEY: &str = "bk.hives";
/// Storage key for the task collection.
pub const TASKS_KEY: &str = "bk.tasks";
/// Storage key for the inventory record.
pub const INVENTORY_KEY: &str = "bk.inventory";

/// A string key-value store.
pub trait Storage: Send + Sync {
    /// Raw text stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the text stored under `key`.
    fn write(&self, key: &str, text: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&self, key: &str, text: &str) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.path_for(key), text)
    }
}

/// In-process storage, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, text: &str) -> io::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::other("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), text.to_string());
        Ok(())
    }
}

/// Read and parse `key`, or return `fallback` on absence or parse failure.
pub fn load_or<T: DeserializeOwned>(storage: &dyn Storage, key: &str, fallback: T) -> T {
    let Some(text) = storage.read(key) else {
        return fallback;
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            warn!("ignoring unreadable storage entry '{}': {}", key, e);
            fallback
        }
    }
}

/// Serialize `value` under `key`. Never fails; errors are logged.
pub fn save<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) {
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(e) => {
            warn!("could not serialize storage entry '{}': {}", key, e);
            return;
        }
    };
    if let Err(e) = storage.write(key, &text) {
        warn!("could not write storage entry '{}': {}", key, e);
    }
}

/// Restore the state, seeding each part that is missing or unreadable.
pub fn load_state(storage: &dyn Storage) -> AppState {
    AppState {
        hives: load_or(storage, HIVES_KEY, seed_hives()),
        tasks: load_or(storage, TASKS_KEY, seed_tasks()),
        inventory: load_or(storage, INVENTORY_KEY, seed_inventory()),
    }
}

/// Write all three entries.
pub fn save_state(storage: &dyn Storage, state: &AppState) {
    save(storage, HIVES_KEY, &state.hives);
    save(storage, TASKS_KEY, &state.tasks);
    save(storage, INVENTORY_KEY, &state.inventory);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Inventory;

    /// Storage whose writes always fail.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&self, _key: &str, _text: &str) -> io::Result<()> {
            Err(io::Error::other("quota exceeded"))
        }
    }

    #[test]
    fn test_missing_entries_fall_back_to_seed() {
        let storage = MemoryStorage::new();
        assert_eq!(load_state(&storage), AppState::seed());
    }

    #[test]
    fn test_unparseable_entry_falls_back() {
        let storage = MemoryStorage::new();
        storage.write(INVENTORY_KEY, "{not json").unwrap();

        let inventory = load_or(&storage, INVENTORY_KEY, Inventory::default());
        assert_eq!(inventory, Inventory::default());
    }

    #[test]
    fn test_round_trip_through_memory() {
        let storage = MemoryStorage::new();
        let mut state = AppState::seed();
        state.inventory.boxes = 7;
        state.hives.truncate(1);

        save_state(&storage, &state);
        assert_eq!(load_state(&storage), state);
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        save_state(&BrokenStorage, &AppState::seed());
        assert_eq!(load_state(&BrokenStorage), AppState::seed());
    }

    #[test]
    fn test_file_storage_paths() {
        let storage = FileStorage::new("data");
        assert_eq!(
            storage.path_for(HIVES_KEY).to_string_lossy(),
            "data/bk.hives.json"
        );
    }
}
