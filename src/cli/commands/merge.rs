//! Merge command implementation

use crate::cli::commands::parse_file_id;
use crate::cli::CliContext;
use crate::storage::{merge_segments, FileSystemStore, MergeOptions, SegmentStore};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Subdirectory of the downloads directory that merged files go to by default
const MERGED_DIR_NAME: &str = "merged";

/// Execute the merge command
pub fn execute(
    ctx: &CliContext,
    file_id: String,
    from: Option<PathBuf>,
    output: Option<PathBuf>,
    verify: bool,
    cleanup: bool,
) -> Result<()> {
    let file_id = parse_file_id(&file_id)?;
    let manifest = ctx
        .segment_store()
        .read_manifest(&file_id)
        .with_context(|| format!("Has '{}' been split?", file_id))?;

    let source = FileSystemStore::new(from.unwrap_or_else(|| ctx.segments_dir()));
    let output = output.unwrap_or_else(|| {
        ctx.downloads_dir()
            .join(MERGED_DIR_NAME)
            .join(file_id.as_str())
    });

    let segment_dir = source.file_dir(&file_id);
    if is_within(&output, &segment_dir) {
        bail!(
            "Output {} would overwrite the segments in {}; pass a different --output",
            output.display(),
            segment_dir.display()
        );
    }

    let written = merge_segments(&manifest, &source, &output, MergeOptions { verify, cleanup })
        .with_context(|| format!("Failed to merge {}", file_id))?;

    ctx.say(format!(
        "{} {} segments ({} bytes) into {}",
        "✓ Merged".green().bold(),
        manifest.segment_count,
        written,
        output.display()
    ));
    Ok(())
}

/// Whether `path` is `dir` or lies inside it, comparing canonical forms when they exist
fn is_within(path: &Path, dir: &Path) -> bool {
    let canonical = |p: &Path| std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    canonical(path).starts_with(canonical(dir))
}
