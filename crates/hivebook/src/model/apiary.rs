//! Apiary records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether the colonies at a site have a laying queen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueenStatus {
    #[default]
    Laying,
    Queenless,
}

impl QueenStatus {
    /// Match a label case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "laying" => Some(QueenStatus::Laying),
            "queenless" => Some(QueenStatus::Queenless),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueenStatus::Laying => "Laying",
            QueenStatus::Queenless => "Queenless",
        }
    }
}

impl fmt::Display for QueenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall colony strength at a site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Weak,
    #[default]
    Moderate,
    Strong,
}

impl Strength {
    /// Match a label case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "weak" => Some(Strength::Weak),
            "moderate" => Some(Strength::Moderate),
            "strong" => Some(Strength::Strong),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named site holding some number of hives.
///
/// Field order is the column order of `apiaries.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apiary {
    /// Stable identity (`A-###` when assigned locally).
    pub id: String,
    /// Display name, also the fallback key when merging CSV rows.
    pub name: String,
    pub queen_status: QueenStatus,
    pub strength: Strength,
    /// Total hive count.
    pub num_hives: u32,
    pub single_hives: u32,
    pub double_hives: u32,
    pub queenless_hives: u32,
    pub nucs: u32,
    #[serde(default)]
    pub notes: String,
    pub last_inspection: NaiveDate,
}

impl Apiary {
    /// Sequential id for the `n`th apiary (`A-001`, `A-002`, ...).
    pub fn sequential_id(n: usize) -> String {
        format!("A-{:03}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_id_is_zero_padded() {
        assert_eq!(Apiary::sequential_id(1), "A-001");
        assert_eq!(Apiary::sequential_id(42), "A-042");
        assert_eq!(Apiary::sequential_id(1234), "A-1234");
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(QueenStatus::from_label(" queenless "), Some(QueenStatus::Queenless));
        assert_eq!(QueenStatus::from_label("absent"), None);
        assert_eq!(Strength::from_label("STRONG"), Some(Strength::Strong));
        assert_eq!(Strength::default().label(), "Moderate");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let apiary = Apiary {
            id: "A-001".to_string(),
            name: "Sunflower-1".to_string(),
            queen_status: QueenStatus::Laying,
            strength: Strength::Strong,
            num_hives: 5,
            single_hives: 3,
            double_hives: 2,
            queenless_hives: 0,
            nucs: 0,
            notes: String::new(),
            last_inspection: NaiveDate::from_ymd_opt(2025, 8, 19).unwrap(),
        };
        let json = serde_json::to_value(&apiary).unwrap();

        assert_eq!(json["queenStatus"], "Laying");
        assert_eq!(json["numHives"], 5);
        assert_eq!(json["lastInspection"], "2025-08-19");
    }
}
