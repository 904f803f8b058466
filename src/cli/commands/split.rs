//! Split command implementation

use crate::cli::CliContext;
use crate::storage::split_file;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the split command
pub fn execute(ctx: &CliContext, file: PathBuf, json: bool) -> Result<()> {
    let chunk_size = ctx.chunk_size()?;
    let store = ctx.segment_store();

    let report = split_file(&file, chunk_size, &store)
        .with_context(|| format!("Failed to split {}", file.display()))?;
    let manifest = &report.manifest;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "file_id": manifest.file_id,
                "chunk_size": manifest.chunk_size,
                "segment_count": manifest.segment_count,
                "total_size": manifest.total_size,
                "root": manifest.root,
                "segments": report.outcome.segment_paths(),
            }))?
        );
        return Ok(());
    }

    ctx.say(format!(
        "{} {} into {} segments of up to {} bytes",
        "✓ Split".green().bold(),
        manifest.file_id.to_string().bold(),
        manifest.segment_count,
        manifest.chunk_size
    ));
    if ctx.verbose {
        for segment in &report.outcome.segments {
            ctx.say(format!(
                "  {} {} ({} bytes) {}",
                "•".cyan(),
                segment.location.display(),
                segment.size,
                segment.digest.to_hex().dimmed()
            ));
        }
    }
    match manifest.root {
        Some(root) => ctx.say(format!("  {}: {}", "Root".bold(), root.to_hex().cyan())),
        None => ctx.say(format!(
            "  {} file is empty, no root recorded",
            "!".yellow()
        )),
    }

    Ok(())
}
