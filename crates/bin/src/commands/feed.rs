//! `feed` subcommands.

use std::{path::Path, sync::Arc};

use recall::{ID, Store, log::InMemoryLog, replay::ViewItem, store::Feed};
use serde_json::json;

use super::CommandResult;
use crate::{
    cli::FeedCommand,
    logfile,
    output::{OutputFormat, cell, print_json, print_table},
};

/// Run a `feed` subcommand against the log at `path`
pub async fn run(command: &FeedCommand, path: &Path, format: OutputFormat) -> CommandResult {
    let log = logfile::open(path).await?;
    let feed: Feed = Feed::new(log.clone());

    match command {
        FeedCommand::Add { value } => {
            let hash = feed.add(value.clone()).await?;
            saved(&log, path, &hash, format).await
        }
        FeedCommand::Remove { hash } => {
            let hash = feed.remove(&ID::from(hash.as_str())).await?;
            saved(&log, path, &hash, format).await
        }
        FeedCommand::List(args) => {
            let items = feed.iter(args.amount).await?.collect::<recall::Result<Vec<_>>>()?;
            show(&items, format)
        }
        FeedCommand::All => show(&feed.all().await?, format),
    }
}

/// Saves the log and reports the hash of the entry just appended.
pub(crate) async fn saved(
    log: &Arc<InMemoryLog>,
    path: &Path,
    hash: &ID,
    format: OutputFormat,
) -> CommandResult {
    logfile::save(log, path).await?;
    match format {
        OutputFormat::Human => println!("{hash}"),
        OutputFormat::Json => print_json(&json!({ "hash": hash })),
    }
    Ok(())
}

/// Prints feed or set items.
pub(crate) fn show(items: &[ViewItem], format: OutputFormat) -> CommandResult {
    match format {
        OutputFormat::Human => {
            if items.is_empty() {
                println!("No items.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|item| vec![item.hash.to_string(), cell(&item.value)])
                .collect();
            print_table(&["HASH", "VALUE"], &rows);
        }
        OutputFormat::Json => print_json(&serde_json::to_value(items)?),
    }
    Ok(())
}
