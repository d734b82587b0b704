//! Loading and saving the operation log file.

use std::{path::Path, sync::Arc};

use recall::log::InMemoryLog;

/// Opens the log stored at `path`, or a fresh one if the file does not exist.
pub async fn open(path: &Path) -> recall::Result<Arc<InMemoryLog>> {
    let log = InMemoryLog::load_from_file(path).await?;
    let entries = log.len().await;
    if entries == 0 {
        tracing::info!("Starting with a fresh log at {}", path.display());
    } else {
        tracing::info!(entries, "Loaded log from {}", path.display());
    }
    Ok(Arc::new(log))
}

/// Writes `log` back to `path`.
pub async fn save(log: &InMemoryLog, path: &Path) -> recall::Result<()> {
    log.save_to_file(path).await?;
    let entries = log.len().await;
    tracing::info!(entries, "Saved log to {}", path.display());
    Ok(())
}
