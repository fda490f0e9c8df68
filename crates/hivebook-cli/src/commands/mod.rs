//! CLI command implementations.

pub mod apiary;
pub mod export;
pub mod import;
pub mod inventory;
pub mod status;
pub mod task;

/// Result type shared by the command handlers.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
