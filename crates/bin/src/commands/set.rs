//! `set` subcommands.

use std::path::Path;

use recall::{Store, store::Set};

use super::{
    CommandResult,
    feed::{saved, show},
};
use crate::{cli::SetCommand, logfile, output::OutputFormat};

/// Run a `set` subcommand against the log at `path`
pub async fn run(command: &SetCommand, path: &Path, format: OutputFormat) -> CommandResult {
    let log = logfile::open(path).await?;
    let set: Set = Set::new(log.clone());

    match command {
        SetCommand::Add { value } => {
            let hash = set.add(value.clone()).await?;
            saved(&log, path, &hash, format).await
        }
        SetCommand::Del { value } => {
            let hash = set.del(value.clone()).await?;
            saved(&log, path, &hash, format).await
        }
        SetCommand::List(args) => {
            let items = set.iter(args.amount).await?.collect::<recall::Result<Vec<_>>>()?;
            show(&items, format)
        }
        SetCommand::All => show(&set.all().await?, format),
    }
}
