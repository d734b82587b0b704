//! CLI argument definitions for the Recall binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::output::OutputFormat;

/// Collection views over a local operation log
#[derive(Parser, Debug)]
#[command(name = "recall")]
#[command(about = "Recall: feeds, sets and ordered key-value stores replayed from an operation log")]
#[command(version)]
pub struct Cli {
    /// Log file to read and append to. Created on first write.
    #[arg(short, long, global = true, default_value = "recall.json", env = "RECALL_LOG_FILE")]
    pub log_file: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "human", env = "RECALL_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append-only list, items removed by hash
    #[command(subcommand)]
    Feed(FeedCommand),
    /// Set of values compared by content
    #[command(subcommand)]
    Set(SetCommand),
    /// Key-value map ordered by position
    #[command(subcommand)]
    Kv(KvCommand),
    /// List the registered store types
    Types,
}

#[derive(Subcommand, Debug)]
pub enum FeedCommand {
    /// Append a value
    Add {
        /// JSON value; anything that is not valid JSON is taken as a string
        #[arg(value_parser = parse_value)]
        value: Value,
    },
    /// Remove the item added under a hash
    Remove { hash: String },
    /// Show items, newest first
    List(ListArgs),
    /// Show every item, oldest first
    All,
}

#[derive(Subcommand, Debug)]
pub enum SetCommand {
    /// Add a value
    Add {
        #[arg(value_parser = parse_value)]
        value: Value,
    },
    /// Remove a value
    Del {
        #[arg(value_parser = parse_value)]
        value: Value,
    },
    /// Show values, most recently added first
    List(ListArgs),
    /// Show every value, oldest first
    All,
}

#[derive(Subcommand, Debug)]
pub enum KvCommand {
    /// Write a value under a key
    Put {
        key: String,
        #[arg(value_parser = parse_value)]
        value: Value,
        /// Position of the key; keeps the current one when omitted
        #[arg(short, long, allow_negative_numbers = true)]
        position: Option<f64>,
    },
    /// Change the position of a key
    Move {
        key: String,
        #[arg(allow_negative_numbers = true)]
        position: f64,
    },
    /// Delete a key
    Del { key: String },
    /// Show the value stored under a key
    Get { key: String },
    /// Show keys, most recently written first
    List(ListArgs),
    /// Show every key, sorted by position
    All,
}

/// Arguments shared by the `list` commands
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Maximum number of items to show
    #[arg(short, long)]
    pub amount: Option<usize>,
}

/// Parses a command line value as JSON, falling back to a JSON string.
pub fn parse_value(raw: &str) -> Result<Value, String> {
    Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}
