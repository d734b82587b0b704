//! `kv` subcommands for the ordered key-value store.

use std::path::Path;

use recall::{
    Store,
    replay::{OrderedEntry, OrderedItem},
    store::OrderedKeyValue,
};

use super::{CommandResult, feed::saved};
use crate::{
    cli::KvCommand,
    logfile,
    output::{OutputFormat, cell, position, print_json, print_table},
};

/// Run a `kv` subcommand against the log at `path`
pub async fn run(command: &KvCommand, path: &Path, format: OutputFormat) -> CommandResult {
    let log = logfile::open(path).await?;
    let kv: OrderedKeyValue = OrderedKeyValue::new(log.clone());

    match command {
        KvCommand::Put {
            key,
            value,
            position,
        } => {
            let hash = kv.put(key.as_str(), value.clone(), *position).await?;
            saved(&log, path, &hash, format).await
        }
        KvCommand::Move { key, position } => {
            let hash = kv.move_to(key.as_str(), *position).await?;
            saved(&log, path, &hash, format).await
        }
        KvCommand::Del { key } => {
            let hash = kv.del(key.as_str()).await?;
            saved(&log, path, &hash, format).await
        }
        KvCommand::Get { key } => {
            let found = kv.get(key).await?;
            match (format, found) {
                (OutputFormat::Human, Some(found)) => println!("{}", cell(&found.value)),
                (OutputFormat::Human, None) => println!("Key '{key}' not found."),
                (OutputFormat::Json, found) => print_json(&serde_json::to_value(found)?),
            }
            Ok(())
        }
        KvCommand::List(args) => {
            let items: Vec<OrderedItem> =
                kv.iter(args.amount).await?.collect::<recall::Result<_>>()?;
            match format {
                OutputFormat::Human => {
                    let rows = items
                        .iter()
                        .map(|i| vec![i.key.clone(), position(i.position), cell(&i.value)])
                        .collect::<Vec<_>>();
                    print_rows(&rows);
                }
                OutputFormat::Json => print_json(&serde_json::to_value(&items)?),
            }
            Ok(())
        }
        KvCommand::All => {
            let entries: Vec<OrderedEntry> = kv.all().await?;
            match format {
                OutputFormat::Human => {
                    let rows = entries
                        .iter()
                        .map(|e| vec![e.key.clone(), position(e.position), cell(&e.value)])
                        .collect::<Vec<_>>();
                    print_rows(&rows);
                }
                OutputFormat::Json => print_json(&serde_json::to_value(&entries)?),
            }
            Ok(())
        }
    }
}

fn print_rows(rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("No keys.");
    } else {
        print_table(&["KEY", "POSITION", "VALUE"], rows);
    }
}
