//! Application state and the operations that mutate it.

use chrono::{Days, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::codec::CsvRow;
use crate::coerce::random_id;
use crate::error::{HivebookError, Result};
use crate::exchange::ImportDocument;
use crate::merge::{merge_by_id, plan_csv_import, CsvImport, ImportOutcome};
use crate::model::{
    today, Apiary, Inventory, InventoryItem, Priority, QueenStatus, Strength, Task, TaskStatus,
};
use crate::validation::{validate_apiary, ApiaryForm};

/// Everything the application tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub hives: Vec<Apiary>,
    pub tasks: Vec<Task>,
    pub inventory: Inventory,
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_hives: u64,
    pub singles: u64,
    pub doubles: u64,
    pub nucs: u64,
    pub queenless_hives: u64,
    pub to_do: usize,
}

/// A task as entered by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: Option<String>,
    pub title: String,
    pub hive_id: String,
    pub due: NaiveDate,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, hive_id: impl Into<String>, due: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            hive_id: hive_id.into(),
            due,
            priority: Priority::Medium,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Partial update for a task; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub hive_id: Option<String>,
    pub due: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl AppState {
    /// Empty collections and zeroed inventory.
    pub fn empty() -> Self {
        Self {
            hives: Vec::new(),
            tasks: Vec::new(),
            inventory: Inventory::default(),
        }
    }

    /// Starter data used when nothing has been stored yet.
    pub fn seed() -> Self {
        Self {
            hives: seed_hives(),
            tasks: seed_tasks(),
            inventory: seed_inventory(),
        }
    }

    // ------------------------------------------------------------------
    // Apiaries
    // ------------------------------------------------------------------

    pub fn apiary(&self, id: &str) -> Option<&Apiary> {
        self.hives.iter().find(|h| h.id == id)
    }

    /// Validate the form and insert a new apiary at the front.
    ///
    /// Nothing changes when validation fails.
    pub fn add_apiary(&mut self, form: &ApiaryForm) -> Result<&Apiary> {
        let report = validate_apiary(form);
        if !report.is_valid() {
            return Err(HivebookError::Invalid(report));
        }
        let values = report.values;

        let mut n = self.hives.len() + 1;
        let mut id = Apiary::sequential_id(n);
        while self.apiary(&id).is_some() {
            n += 1;
            id = Apiary::sequential_id(n);
        }

        let apiary = Apiary {
            id,
            name: values.name,
            queen_status: values.queen_status.unwrap_or_default(),
            strength: values.strength.unwrap_or_default(),
            num_hives: values.num_hives,
            single_hives: values.single_hives,
            double_hives: values.double_hives,
            queenless_hives: values.queenless_hives,
            nucs: values.nucs,
            notes: values.notes,
            last_inspection: today(),
        };
        info!("added apiary {} ({})", apiary.id, apiary.name);
        self.hives.insert(0, apiary);
        Ok(&self.hives[0])
    }

    /// Validate the form and replace the apiary's fields, stamping today's
    /// date as the last inspection. Enum fields left unset keep their value.
    pub fn edit_apiary(&mut self, id: &str, form: &ApiaryForm) -> Result<&Apiary> {
        let report = validate_apiary(form);
        if !report.is_valid() {
            return Err(HivebookError::Invalid(report));
        }
        let values = report.values;

        let apiary = self
            .hives
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| HivebookError::NotFound(format!("apiary {}", id)))?;

        apiary.name = values.name;
        if let Some(status) = values.queen_status {
            apiary.queen_status = status;
        }
        if let Some(strength) = values.strength {
            apiary.strength = strength;
        }
        apiary.num_hives = values.num_hives;
        apiary.single_hives = values.single_hives;
        apiary.double_hives = values.double_hives;
        apiary.queenless_hives = values.queenless_hives;
        apiary.nucs = values.nucs;
        apiary.notes = values.notes;
        apiary.last_inspection = today();
        info!("edited apiary {}", apiary.id);
        Ok(apiary)
    }

    /// Remove every apiary whose id is listed. Tasks pointing at them stay.
    pub fn delete_apiaries<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let before = self.hives.len();
        self.hives
            .retain(|h| !ids.iter().any(|id| id.as_ref() == h.id));
        let removed = before - self.hives.len();
        info!("deleted {} apiaries", removed);
        removed
    }

    /// Apiaries whose name or id contains `query`, ignoring case.
    pub fn search_apiaries(&self, query: &str) -> Vec<&Apiary> {
        let query = query.trim().to_lowercase();
        self.hives
            .iter()
            .filter(|h| {
                query.is_empty()
                    || h.name.to_lowercase().contains(&query)
                    || h.id.to_lowercase().contains(&query)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| HivebookError::NotFound(format!("task {}", id)))
    }

    /// Insert a new to-do task at the front.
    pub fn add_task(&mut self, draft: TaskDraft) -> &Task {
        let id = draft.id.unwrap_or_else(|| random_id("T"));
        let task = Task {
            id,
            title: draft.title,
            hive_id: draft.hive_id,
            due: draft.due,
            status: TaskStatus::ToDo,
            priority: draft.priority,
        };
        info!("added task {} ({})", task.id, task.title);
        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    pub fn set_task_status(&mut self, id: &str, status: TaskStatus) -> Result<&Task> {
        let task = self.task_mut(id)?;
        task.status = status;
        debug!("task {} -> {}", task.id, status);
        Ok(task)
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<&Task> {
        let task = self.task_mut(id)?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(hive_id) = patch.hive_id {
            task.hive_id = hive_id;
        }
        if let Some(due) = patch.due {
            task.due = due;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        Ok(task)
    }

    /// Push a task's due date to tomorrow.
    pub fn snooze_task(&mut self, id: &str) -> Result<&Task> {
        let tomorrow = today()
            .checked_add_days(Days::new(1))
            .unwrap_or_else(today);
        self.update_task(
            id,
            TaskPatch {
                due: Some(tomorrow),
                ..TaskPatch::default()
            },
        )
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| HivebookError::NotFound(format!("task {}", id)))?;
        Ok(self.tasks.remove(index))
    }

    /// To-do tasks, earliest due first.
    pub fn todo_tasks(&self) -> Vec<&Task> {
        let mut todos: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::ToDo)
            .collect();
        todos.sort_by_key(|t| t.due);
        todos
    }

    pub fn done_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .collect()
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    pub fn set_inventory(&mut self, item: InventoryItem, value: u32) {
        self.inventory.set(item, value);
    }

    pub fn adjust_inventory(&mut self, item: InventoryItem, delta: i64) -> u32 {
        self.inventory.adjust(item, delta)
    }

    // ------------------------------------------------------------------
    // Imports
    // ------------------------------------------------------------------

    /// Merge a JSON document by id.
    pub fn apply_json_import(&mut self, doc: &ImportDocument) -> ImportOutcome {
        let hives = merge_by_id(&self.hives, &doc.hives);
        let tasks = merge_by_id(&self.tasks, &doc.tasks);

        self.hives = hives;
        self.tasks = tasks;
        self.inventory = doc.inventory;

        let outcome = ImportOutcome::Json {
            apiaries: doc.hives.len(),
            tasks: doc.tasks.len(),
        };
        info!("{}", outcome);
        outcome
    }

    /// Reconcile decoded CSV rows with whichever collection they describe.
    ///
    /// State is only touched once the whole batch has been reconciled.
    pub fn apply_csv_import(&mut self, rows: &[CsvRow]) -> Result<ImportOutcome> {
        let plan = plan_csv_import(&self.hives, &self.tasks, &self.inventory, rows)?;

        let outcome = match plan {
            CsvImport::Tasks(merged) => {
                self.tasks = merged.records;
                ImportOutcome::CsvTasks {
                    count: merged.count,
                }
            }
            CsvImport::Apiaries(merged) => {
                self.hives = merged.records;
                ImportOutcome::CsvApiaries {
                    count: merged.count,
                }
            }
            CsvImport::Inventory(inventory) => {
                self.inventory = inventory;
                ImportOutcome::CsvInventory
            }
        };
        info!("{}", outcome);
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    pub fn dashboard(&self) -> Dashboard {
        let sum = |f: fn(&Apiary) -> u32| -> u64 { self.hives.iter().map(|h| u64::from(f(h))).sum() };
        Dashboard {
            total_hives: sum(|h| h.num_hives),
            singles: sum(|h| h.single_hives),
            doubles: sum(|h| h.double_hives),
            nucs: sum(|h| h.nucs),
            queenless_hives: sum(|h| h.queenless_hives),
            to_do: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::ToDo)
                .count(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seed()
    }
}

fn seed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(today)
}

pub(crate) fn seed_hives() -> Vec<Apiary> {
    vec![
        seed_hive("A-001", "Sunflower-1", QueenStatus::Laying, Strength::Strong, [5, 3, 2, 0], (2025, 8, 19)),
        seed_hive("A-002", "Clover-2", QueenStatus::Queenless, Strength::Weak, [2, 2, 0, 2], (2025, 8, 28)),
        seed_hive("A-003", "Acacia-3", QueenStatus::Laying, Strength::Moderate, [4, 1, 3, 0], (2025, 8, 23)),
    ]
}

/// `counts` is total, single, double, queenless.
fn seed_hive(
    id: &str,
    name: &str,
    queen_status: QueenStatus,
    strength: Strength,
    counts: [u32; 4],
    inspected: (i32, u32, u32),
) -> Apiary {
    Apiary {
        id: id.to_string(),
        name: name.to_string(),
        queen_status,
        strength,
        num_hives: counts[0],
        single_hives: counts[1],
        double_hives: counts[2],
        queenless_hives: counts[3],
        nucs: 0,
        notes: String::new(),
        last_inspection: seed_date(inspected.0, inspected.1, inspected.2),
    }
}

pub(crate) fn seed_tasks() -> Vec<Task> {
    let task = |id: &str, title: &str, hive_id: &str, priority| Task {
        id: id.to_string(),
        title: title.to_string(),
        hive_id: hive_id.to_string(),
        due: today(),
        status: TaskStatus::ToDo,
        priority,
    };

    vec![
        task("T-001", "Oxalic vapor treatment", "A-003", Priority::High),
        task("T-002", "Add equipment", "A-001", Priority::Medium),
        task("T-003", "Introduce queen", "A-002", Priority::High),
    ]
}

pub(crate) fn seed_inventory() -> Inventory {
    Inventory {
        supers: 12,
        boxes: 120,
        feeders: 6,
        syrup_l: 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn test_seed_dashboard() {
        let dashboard = AppState::seed().dashboard();

        assert_eq!(dashboard.total_hives, 11);
        assert_eq!(dashboard.singles, 6);
        assert_eq!(dashboard.doubles, 5);
        assert_eq!(dashboard.queenless_hives, 2);
        assert_eq!(dashboard.nucs, 0);
        assert_eq!(dashboard.to_do, 3);
    }

    #[test]
    fn test_add_apiary_inserts_at_front_with_next_id() {
        let mut state = AppState::seed();
        let added = state
            .add_apiary(&ApiaryForm::new("Lavender-4").with_hives(3, 2, 1))
            .unwrap();

        assert_eq!(added.id, "A-004");
        assert_eq!(added.last_inspection, today());
        assert_eq!(state.hives[0].name, "Lavender-4");
        assert_eq!(state.hives.len(), 4);
    }

    #[test]
    fn test_add_apiary_skips_taken_id() {
        let mut state = AppState::seed();
        state.delete_apiaries(&["A-001"]);

        let added = state.add_apiary(&ApiaryForm::new("Heather-5")).unwrap();
        assert_eq!(added.id, "A-004");
    }

    #[test]
    fn test_add_invalid_apiary_fails_closed() {
        let mut state = AppState::seed();
        let err = state
            .add_apiary(&ApiaryForm::new("Bad").with_hives(2, 2, 1))
            .unwrap_err();

        match err {
            HivebookError::Invalid(report) => assert!(report.error("doubleHives").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(state.hives.len(), 3);
    }

    #[test]
    fn test_edit_apiary_restamps_inspection() {
        let mut state = AppState::seed();
        let edited = state
            .edit_apiary("A-002", &ApiaryForm::new("Clover-2").with_hives(3, 3, 0))
            .unwrap();

        assert_eq!(edited.num_hives, 3);
        assert_eq!(edited.last_inspection, today());
        assert_eq!(edited.strength, Strength::Weak);
    }

    #[test]
    fn test_edit_unknown_apiary() {
        let mut state = AppState::seed();
        let err = state
            .edit_apiary("A-999", &ApiaryForm::new("Ghost"))
            .unwrap_err();
        assert!(matches!(err, HivebookError::NotFound(_)));
    }

    #[test]
    fn test_delete_apiaries_keeps_dangling_tasks() {
        let mut state = AppState::seed();
        let removed = state.delete_apiaries(&["A-002", "A-003", "A-404"]);

        assert_eq!(removed, 2);
        assert_eq!(state.hives.len(), 1);
        assert_eq!(state.tasks.len(), 3);
    }

    #[test]
    fn test_search_apiaries() {
        let state = AppState::seed();

        assert_eq!(state.search_apiaries("clover").len(), 1);
        assert_eq!(state.search_apiaries("a-00").len(), 3);
        assert_eq!(state.search_apiaries("").len(), 3);
        assert!(state.search_apiaries("heather").is_empty());
    }

    #[test]
    fn test_add_task_forces_todo() {
        let mut state = AppState::empty();
        let task = state.add_task(TaskDraft::new("Extract honey", "A-001", today()));

        assert!(task.id.starts_with("T-"));
        assert_eq!(task.status, TaskStatus::ToDo);
    }

    #[test]
    fn test_task_lifecycle() {
        let mut state = AppState::seed();

        state.set_task_status("T-002", TaskStatus::Done).unwrap();
        assert_eq!(state.done_tasks().len(), 1);
        assert_eq!(state.todo_tasks().len(), 2);

        let snoozed = state.snooze_task("T-001").unwrap();
        assert!(snoozed.due > today());

        let deleted = state.delete_task("T-003").unwrap();
        assert_eq!(deleted.title, "Introduce queen");
        assert!(state.delete_task("T-003").is_err());
    }

    #[test]
    fn test_todo_tasks_sorted_by_due() {
        let mut state = AppState::empty();
        let later = seed_date(2025, 10, 1);
        let sooner = seed_date(2025, 9, 1);
        state.add_task(TaskDraft::new("Later", "A-001", later));
        state.add_task(TaskDraft::new("Sooner", "A-001", sooner));
        state.add_task(TaskDraft::new("Middle", "A-001", seed_date(2025, 9, 15)));

        let titles: Vec<&str> = state.todo_tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Middle", "Later"]);
    }

    #[test]
    fn test_update_task_patch() {
        let mut state = AppState::seed();
        let task = state
            .update_task(
                "T-001",
                TaskPatch {
                    title: Some("Formic treatment".to_string()),
                    priority: Some(Priority::Low),
                    ..TaskPatch::default()
                },
            )
            .unwrap();

        assert_eq!(task.title, "Formic treatment");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.hive_id, "A-003");
    }

    #[test]
    fn test_inventory_operations() {
        let mut state = AppState::seed();
        state.set_inventory(InventoryItem::Feeders, 9);
        assert_eq!(state.adjust_inventory(InventoryItem::Feeders, -2), 7);
        assert_eq!(state.adjust_inventory(InventoryItem::SyrupL, -100), 0);
    }

    #[test]
    fn test_csv_import_end_to_end() {
        let mut state = AppState::empty();
        state.hives = vec![Apiary::coerce(&serde_json::json!({
            "id": "A-001", "name": "Sunflower-1",
            "numHives": 5, "singleHives": 3, "doubleHives": 2
        }))];

        let rows = decode("name,numHives,singleHives,doubleHives\nSunflower-1,6,4,2").unwrap();
        let outcome = state.apply_csv_import(&rows).unwrap();

        assert_eq!(outcome, ImportOutcome::CsvApiaries { count: 1 });
        assert_eq!(state.hives.len(), 1);
        assert_eq!(state.hives[0].id, "A-001");
        assert_eq!(state.hives[0].num_hives, 6);
        assert_eq!(state.hives[0].single_hives, 4);
        assert_eq!(state.hives[0].double_hives, 2);
    }

    #[test]
    fn test_failed_csv_import_leaves_state_untouched() {
        let mut state = AppState::seed();
        let before = state.clone();

        let rows = decode("colour\nred").unwrap();
        assert!(state.apply_csv_import(&rows).is_err());
        assert_eq!(state, before);
    }
}
