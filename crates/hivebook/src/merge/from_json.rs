//! Id-only reconciliation for JSON documents.

use indexmap::IndexMap;
use log::debug;

use super::Keyed;

/// Overwrite existing records by id and append records with new ids.
///
/// Incoming records are already coerced and fully populated, so a match
/// replaces the stored record outright. Existing records keep their
/// position; new ones are appended in incoming order.
pub fn merge_by_id<T: Keyed + Clone>(existing: &[T], incoming: &[T]) -> Vec<T> {
    let mut by_id: IndexMap<String, T> = existing
        .iter()
        .map(|record| (record.id().to_string(), record.clone()))
        .collect();

    for record in incoming {
        let replaced = by_id.insert(record.id().to_string(), record.clone());
        debug!(
            "json merge {}: {}",
            record.id(),
            if replaced.is_some() { "overwrote" } else { "inserted" }
        );
    }

    by_id.into_values().collect()
}
