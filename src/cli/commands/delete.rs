//! Delete command implementation

use crate::cli::commands::parse_file_id;
use crate::cli::CliContext;
use crate::storage::SegmentStore;
use anyhow::{Context, Result};
use colored::Colorize;

/// Execute the delete command
pub fn execute(ctx: &CliContext, file_id: String) -> Result<()> {
    let file_id = parse_file_id(&file_id)?;
    ctx.segment_store()
        .delete_file(&file_id)
        .with_context(|| format!("Failed to delete '{}'", file_id))?;

    ctx.say(format!("{} {}", "✓ Deleted".green().bold(), file_id));
    Ok(())
}
