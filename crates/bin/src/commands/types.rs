//! `types` command - lists the registered store types.

use recall::store::StoreType;

use super::CommandResult;
use crate::output::{OutputFormat, print_json, print_table};

/// Run the types command
pub fn run(format: OutputFormat) -> CommandResult {
    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = StoreType::all()
                .iter()
                .map(|t| vec![t.type_id().to_string(), format!("{t:?}")])
                .collect();
            print_table(&["TYPE", "STORE"], &rows);
        }
        OutputFormat::Json => print_json(&serde_json::to_value(StoreType::all())?),
    }
    Ok(())
}
