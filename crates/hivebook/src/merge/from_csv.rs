//! Natural-key reconciliation for CSV rows.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use crate::codec::CsvRow;
use crate::coerce::{random_id, row_to_value, RawRecord};
use crate::error::{HivebookError, Result};
use crate::model::{Apiary, Inventory, Task};

use super::classify::{classify, CsvFormat};
use super::outcome::Merged;

/// A fully reconciled CSV import, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvImport {
    Tasks(Merged<Task>),
    Apiaries(Merged<Apiary>),
    Inventory(Inventory),
}

/// Classify the rows and reconcile them with the matching collection.
///
/// The header of the first row decides the format. Fails with
/// `EmptyData` when there are no rows and `UnknownFormat` when the header
/// matches no known shape.
pub fn plan_csv_import(
    hives: &[Apiary],
    tasks: &[Task],
    inventory: &Inventory,
    rows: &[CsvRow],
) -> Result<CsvImport> {
    let Some(first) = rows.first() else {
        return Err(HivebookError::EmptyData("CSV contains no rows".to_string()));
    };

    let format = classify(first.keys().map(String::as_str));
    debug!("csv import classified as {} ({} rows)", format, rows.len());

    match format {
        CsvFormat::Tasks => Ok(CsvImport::Tasks(merge_task_rows(tasks, rows))),
        CsvFormat::Apiaries => Ok(CsvImport::Apiaries(merge_apiary_rows(hives, rows))),
        CsvFormat::Inventory => Ok(CsvImport::Inventory(merge_inventory_row(inventory, rows))),
        CsvFormat::Unknown => Err(HivebookError::UnknownFormat(
            first.keys().cloned().collect::<Vec<_>>().join(", "),
        )),
    }
}

/// Merge task rows: by id, else by `(title, hiveId, due)`, else insert.
///
/// A signature match keeps the stored id and is not counted.
pub fn merge_task_rows(existing: &[Task], rows: &[CsvRow]) -> Merged<Task> {
    let mut by_id: IndexMap<String, Task> = existing
        .iter()
        .map(|t| (t.id.clone(), t.clone()))
        .collect();
    let by_signature: HashMap<_, String> = existing
        .iter()
        .map(|t| (t.signature(), t.id.clone()))
        .collect();
    let mut count = 0;

    for row in rows {
        let raw = row_to_value(row);
        let supplied = RawRecord::new(&raw).supplied_id();
        let incoming = Task::coerce(&raw);

        if let Some(id) = supplied.filter(|id| by_id.contains_key(id)) {
            debug!("task {}: matched by id", id);
            by_id.insert(id, incoming);
            count += 1;
        } else if let Some(id) = by_signature.get(&incoming.signature()) {
            debug!("task {}: matched by signature", id);
            by_id.insert(id.clone(), Task { id: id.clone(), ..incoming });
        } else {
            let id = fresh_id(&by_id, || random_id("T"));
            debug!("task {}: inserted", id);
            by_id.insert(id.clone(), Task { id, ..incoming });
            count += 1;
        }
    }

    Merged {
        records: by_id.into_values().collect(),
        count,
    }
}

/// Merge apiary rows: by id, else by name (case-insensitive), else insert
/// under the next sequential id. Every row is counted.
pub fn merge_apiary_rows(existing: &[Apiary], rows: &[CsvRow]) -> Merged<Apiary> {
    let mut by_id: IndexMap<String, Apiary> = existing
        .iter()
        .map(|a| (a.id.clone(), a.clone()))
        .collect();
    let by_name: HashMap<String, String> = existing
        .iter()
        .map(|a| (a.name.to_lowercase(), a.id.clone()))
        .collect();
    let mut count = 0;

    for row in rows {
        let raw = row_to_value(row);
        let supplied = RawRecord::new(&raw).supplied_id();
        let incoming = Apiary::coerce(&raw);

        let name_match = if incoming.name.is_empty() {
            None
        } else {
            by_name.get(&incoming.name.to_lowercase()).cloned()
        };

        if let Some(id) = supplied.filter(|id| by_id.contains_key(id)) {
            debug!("apiary {}: matched by id", id);
            by_id.insert(id, incoming);
        } else if let Some(id) = name_match {
            debug!("apiary {}: matched by name {:?}", id, incoming.name);
            by_id.insert(id.clone(), Apiary { id, ..incoming });
        } else {
            let mut n = by_id.len();
            let id = fresh_id(&by_id, || {
                n += 1;
                Apiary::sequential_id(n)
            });
            debug!("apiary {}: inserted", id);
            by_id.insert(id.clone(), Apiary { id, ..incoming });
        }
        count += 1;
    }

    Merged {
        records: by_id.into_values().collect(),
        count,
    }
}

/// Overwrite the four counters from the first row; later rows are ignored.
/// A missing column reads as zero.
pub fn merge_inventory_row(existing: &Inventory, rows: &[CsvRow]) -> Inventory {
    let Some(first) = rows.first() else {
        return *existing;
    };
    let raw = row_to_value(first);
    Inventory::coerce(&raw)
}

/// Draw ids from `next` until one is not already taken.
fn fresh_id<T>(taken: &IndexMap<String, T>, mut next: impl FnMut() -> String) -> String {
    loop {
        let id = next();
        if !taken.contains_key(&id) {
            return id;
        }
    }
}
