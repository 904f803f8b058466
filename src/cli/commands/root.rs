//! Root command implementation

use crate::cli::commands::parse_file_id;
use crate::cli::CliContext;
use crate::storage::RootStore;
use anyhow::{Context, Result};

/// Execute the root command
pub fn execute(ctx: &CliContext, file_id: String) -> Result<()> {
    let file_id = parse_file_id(&file_id)?;
    let store = ctx.segment_store();

    let root = store
        .read_root(&file_id)
        .with_context(|| format!("Has '{}' been split?", file_id))?;
    println!("{}", root.to_hex());

    Ok(())
}
