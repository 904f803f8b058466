//! Verify command implementation

use crate::cli::CliContext;
use crate::core::{hash_file, Hash};
use crate::proofs::SegmentProof;
use crate::storage::RootStore;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the verify command
pub fn execute(
    ctx: &CliContext,
    proof: PathBuf,
    segment: Option<PathBuf>,
    root: Option<String>,
    json: bool,
) -> Result<()> {
    let proof_data = std::fs::read_to_string(&proof)
        .with_context(|| format!("Failed to read proof {}", proof.display()))?;
    let proof = SegmentProof::from_json(&proof_data)?;

    let trusted_root = match root {
        Some(hex) => Hash::from_hex(&hex).context("Invalid --root digest")?,
        None => ctx
            .segment_store()
            .read_root(&proof.file_id)
            .with_context(|| format!("No local root for '{}'", proof.file_id))?,
    };

    let leaf = match &segment {
        Some(path) => hash_file(path)
            .with_context(|| format!("Failed to hash segment {}", path.display()))?,
        None => proof.leaf,
    };

    if ctx.verbose && !json {
        ctx.say(format!("  • File: {}", proof.file_id));
        ctx.say(format!("  • Segment: {}", proof.segment_index));
        ctx.say(format!("  • Leaf: {}", leaf.to_hex().cyan()));
        ctx.say(format!("  • Root: {}", trusted_root.to_hex().cyan()));
        ctx.say(format!("  • Proof steps: {}", proof.path.len()));
    }

    let valid = proof.verify_leaf(&leaf, &trusted_root)?;

    if json {
        println!(
            "{}",
            json!({
                "file_id": proof.file_id,
                "segment_index": proof.segment_index,
                "leaf": leaf,
                "root": trusted_root,
                "valid": valid,
            })
        );
    } else if valid {
        ctx.say(format!(
            "{} segment {} of {}",
            "✓ Verified".green().bold(),
            proof.segment_index,
            proof.file_id
        ));
    } else {
        eprintln!(
            "{} segment {} of {}",
            "✗ Verification failed for".red().bold(),
            proof.segment_index,
            proof.file_id
        );
    }

    if !valid {
        bail!("proof does not match root {}", trusted_root);
    }
    Ok(())
}
