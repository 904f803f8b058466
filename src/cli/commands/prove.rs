//! Prove command implementation

use crate::cli::commands::parse_file_id;
use crate::cli::CliContext;
use crate::proofs::SegmentProof;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the prove command
pub fn execute(
    ctx: &CliContext,
    file_id: String,
    index: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let file_id = parse_file_id(&file_id)?;
    let store = ctx.segment_store();

    let proof = SegmentProof::generate(&store, &file_id, index)
        .with_context(|| format!("Failed to prove segment {} of {}", index, file_id))?;
    let json = proof.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            ctx.say(format!(
                "{} segment {} of {} ({} steps) -> {}",
                "✓ Proved".green().bold(),
                index,
                file_id,
                proof.path.len(),
                path.display()
            ));
        }
        None => println!("{}", json),
    }

    Ok(())
}
