//! List command implementation

use crate::cli::CliContext;
use crate::storage::SegmentStore;
use anyhow::Result;
use colored::Colorize;

/// Execute the list command
pub fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    let store = ctx.segment_store();
    let manifests = store
        .list_files()?
        .iter()
        .map(|file_id| store.read_manifest(file_id))
        .collect::<crate::core::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manifests)?);
        return Ok(());
    }

    if manifests.is_empty() {
        ctx.say(format!(
            "No files in {}",
            store.base().display().to_string().yellow()
        ));
        return Ok(());
    }

    ctx.say(format!("{}", "Chunked files".green().bold()));
    for manifest in &manifests {
        let root = manifest
            .root
            .map(|r| r.to_hex()[..16].to_string())
            .unwrap_or_else(|| "-".to_string());
        ctx.say(format!(
            "  {}  {} segments  {} bytes  {}",
            manifest.file_id.to_string().bold(),
            manifest.segment_count,
            manifest.total_size,
            root.cyan()
        ));
    }

    Ok(())
}
