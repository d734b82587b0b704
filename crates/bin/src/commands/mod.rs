//! Subcommand implementations.

pub mod feed;
pub mod kv;
pub mod set;
pub mod types;

/// Result type shared by the command handlers.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
