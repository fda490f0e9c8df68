//! CSV shape detection from header names.

use std::collections::HashSet;
use std::fmt;

/// Which collection a CSV file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsvFormat {
    Tasks,
    Apiaries,
    Inventory,
    Unknown,
}

impl fmt::Display for CsvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CsvFormat::Tasks => "tasks",
            CsvFormat::Apiaries => "apiaries",
            CsvFormat::Inventory => "inventory",
            CsvFormat::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

const APIARY_COLUMNS: &[&str] = &["name", "numhives", "singlehives", "doublehives"];
const INVENTORY_COLUMNS: &[&str] = &["boxes", "supers", "feeders", "syrupl"];

/// Classify a CSV by its header names (case-insensitive).
///
/// Checked in order: `title` and `due` together mean tasks; any apiary
/// column means apiaries; any inventory column means inventory.
pub fn classify<'a>(headers: impl IntoIterator<Item = &'a str>) -> CsvFormat {
    let headers: HashSet<String> = headers.into_iter().map(|h| h.to_lowercase()).collect();
    let has = |column: &str| headers.contains(column);

    if has("title") && has("due") {
        CsvFormat::Tasks
    } else if APIARY_COLUMNS.iter().any(|c| has(c)) {
        CsvFormat::Apiaries
    } else if INVENTORY_COLUMNS.iter().any(|c| has(c)) {
        CsvFormat::Inventory
    } else {
        CsvFormat::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tasks_needs_title_and_due() {
        assert_eq!(classify(["id", "Title", "DUE"]), CsvFormat::Tasks);
        assert_eq!(classify(["title"]), CsvFormat::Unknown);
    }

    #[test]
    fn test_tasks_win_over_apiaries() {
        assert_eq!(classify(["title", "due", "name"]), CsvFormat::Tasks);
    }

    #[test]
    fn test_classify_apiaries() {
        assert_eq!(classify(["name"]), CsvFormat::Apiaries);
        assert_eq!(classify(["id", "NumHives"]), CsvFormat::Apiaries);
    }

    #[test]
    fn test_apiaries_win_over_inventory() {
        assert_eq!(classify(["name", "boxes"]), CsvFormat::Apiaries);
    }

    #[test]
    fn test_classify_inventory() {
        assert_eq!(classify(["boxes", "supers", "feeders", "syrupL"]), CsvFormat::Inventory);
        assert_eq!(classify(["syrupl"]), CsvFormat::Inventory);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(["foo", "bar"]), CsvFormat::Unknown);
        assert_eq!(classify(Vec::<&str>::new()), CsvFormat::Unknown);
    }
}
