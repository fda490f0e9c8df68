//! Apiary form validation for direct create and edit.
//!
//! Imports do not pass through here; imported rows are coerced but never
//! checked against these rules.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::coerce::parse_count;
use crate::model::{QueenStatus, Strength};

/// An apiary as typed into the add/edit form. Counts are raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiaryForm {
    pub name: String,
    pub queen_status: Option<QueenStatus>,
    pub strength: Option<Strength>,
    pub num_hives: String,
    pub single_hives: String,
    pub double_hives: String,
    pub queenless_hives: String,
    pub nucs: String,
    pub notes: String,
}

impl ApiaryForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the three hive counts.
    pub fn with_hives(mut self, total: u32, single: u32, double: u32) -> Self {
        self.num_hives = total.to_string();
        self.single_hives = single.to_string();
        self.double_hives = double.to_string();
        self
    }

    pub fn with_queenless(mut self, queenless: u32) -> Self {
        self.queenless_hives = queenless.to_string();
        self
    }

    pub fn with_nucs(mut self, nucs: u32) -> Self {
        self.nucs = nucs.to_string();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_queen_status(mut self, status: QueenStatus) -> Self {
        self.queen_status = Some(status);
        self
    }

    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = Some(strength);
        self
    }
}

/// Normalized form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiaryValues {
    /// Trimmed name.
    pub name: String,
    pub queen_status: Option<QueenStatus>,
    pub strength: Option<Strength>,
    pub num_hives: u32,
    pub single_hives: u32,
    pub double_hives: u32,
    pub queenless_hives: u32,
    pub nucs: u32,
    pub notes: String,
}

/// Outcome of validating an apiary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Field name (wire spelling) to message, in rule order.
    pub errors: IndexMap<String, String>,
    pub values: ApiaryValues,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.values().map(String::as_str).collect();
        write!(f, "{}", messages.join(" "))
    }
}

/// Check an apiary form. Every rule is evaluated; a later message on the
/// same field replaces an earlier one.
pub fn validate_apiary(form: &ApiaryForm) -> ValidationReport {
    let values = ApiaryValues {
        name: form.name.trim().to_string(),
        queen_status: form.queen_status,
        strength: form.strength,
        num_hives: parse_count(&form.num_hives),
        single_hives: parse_count(&form.single_hives),
        double_hives: parse_count(&form.double_hives),
        queenless_hives: parse_count(&form.queenless_hives),
        nucs: parse_count(&form.nucs),
        notes: form.notes.clone(),
    };

    let mut errors = IndexMap::new();
    let mut fail = |field: &str, message: &str| {
        errors.insert(field.to_string(), message.to_string());
    };

    if values.name.is_empty() {
        fail("name", "Name is required.");
    }
    // Counts are unsigned after parsing, so the total needs no lower bound.
    if values.single_hives > values.num_hives {
        fail("singleHives", "Single hives cannot exceed total.");
    }
    if values.double_hives > values.num_hives {
        fail("doubleHives", "Double hives cannot exceed total.");
    }
    if u64::from(values.single_hives) + u64::from(values.double_hives) > u64::from(values.num_hives) {
        fail("doubleHives", "Single + Double cannot exceed total.");
    }
    if values.queenless_hives > values.num_hives {
        fail("queenlessHives", "Queenless hives cannot exceed total.");
    }

    ValidationReport { errors, values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let report = validate_apiary(&ApiaryForm::new("   ").with_hives(1, 0, 0));

        assert!(!report.is_valid());
        assert_eq!(report.error("name"), Some("Name is required."));
    }

    #[test]
    fn test_zero_total_is_valid() {
        let report = validate_apiary(&ApiaryForm::new("X").with_hives(0, 0, 0));
        assert!(report.is_valid());
    }

    #[test]
    fn test_singles_must_fit_total() {
        let report = validate_apiary(&ApiaryForm::new("X").with_hives(0, 1, 0));

        assert!(!report.is_valid());
        assert!(report.error("singleHives").is_some());
    }

    #[test]
    fn test_combined_count_must_fit_total() {
        let report = validate_apiary(&ApiaryForm::new("Y").with_hives(2, 2, 1));

        assert!(!report.is_valid());
        assert_eq!(report.error("doubleHives"), Some("Single + Double cannot exceed total."));
        assert!(report.error("singleHives").is_none());
    }

    #[test]
    fn test_combined_message_replaces_double_message() {
        let report = validate_apiary(&ApiaryForm::new("Z").with_hives(1, 0, 3));

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.error("doubleHives"), Some("Single + Double cannot exceed total."));
    }

    #[test]
    fn test_multiple_failures_reported() {
        let report = validate_apiary(&ApiaryForm::new("").with_hives(1, 2, 0).with_queenless(4));

        assert_eq!(
            report.errors.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["name", "singleHives", "doubleHives", "queenlessHives"]
        );
    }

    #[test]
    fn test_values_are_normalized() {
        let mut form = ApiaryForm::new("  Sunflower-1 ");
        form.num_hives = "5 hives".to_string();
        form.single_hives = "-2".to_string();
        let report = validate_apiary(&form);

        assert_eq!(report.values.name, "Sunflower-1");
        assert_eq!(report.values.num_hives, 5);
        assert_eq!(report.values.single_hives, 0);
    }
}
