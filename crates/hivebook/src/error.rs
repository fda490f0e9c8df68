//! Error types for the Hivebook library.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// Main error type for Hivebook operations.
#[derive(Debug, Error)]
pub enum HivebookError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural CSV error (only raised in strict mode).
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV headers match none of the known record shapes.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Empty file or no rows to import.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// An apiary form failed validation.
    #[error("Invalid apiary: {0}")]
    Invalid(ValidationReport),

    /// No record with the given id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Encoded output could not be produced.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HivebookError {
    /// Short status line shown after a failed JSON import.
    pub fn json_import_message(&self) -> String {
        match self {
            HivebookError::Io { .. } => "Import failed: could not read file".to_string(),
            _ => "Import failed: invalid file".to_string(),
        }
    }

    /// Short status line shown after a failed CSV import.
    pub fn csv_import_message(&self) -> String {
        match self {
            HivebookError::EmptyData(_) => "CSV contains no rows.".to_string(),
            HivebookError::UnknownFormat(_) => {
                "Unknown CSV format. Expected Apiaries, Tasks, or Inventory columns.".to_string()
            }
            HivebookError::Io { .. } => "Import failed: could not read file".to_string(),
            _ => "Import failed: invalid CSV".to_string(),
        }
    }
}

/// Result type alias for Hivebook operations.
pub type Result<T> = std::result::Result<T, HivebookError>;
