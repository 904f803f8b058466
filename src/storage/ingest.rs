//! Whole-file operations built on the chunker, the stores and the merkle tree

use crate::core::{error::*, types::*};
use crate::proofs::merkle::build_root;
use crate::storage::chunk::{rehash_segments, Chunker, SplitOutcome};
use crate::storage::store::{RootStore, SegmentManifest, SegmentStore};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// What `split_file` produced
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub manifest: SegmentManifest,
    pub outcome: SplitOutcome,
}

impl SplitReport {
    /// Root digest, `None` for an empty file
    pub fn root(&self) -> Option<RootHash> {
        self.manifest.root
    }
}

/// Split a file on disk into `store`, then persist its root and manifest.
///
/// An empty file is recorded with zero segments and no root; a root left over
/// from an earlier split of the same file is removed.
pub fn split_file<S>(path: &Path, chunk_size: usize, store: &S) -> Result<SplitReport>
where
    S: SegmentStore + RootStore,
{
    let chunker = Chunker::new(chunk_size)?;
    let file_id = FileId::from_path(path)?;
    let file = File::open(path)?;

    let outcome = chunker.split(file, &file_id, store)?;

    let root = if outcome.leaf_digests.is_empty() {
        warn!(%file_id, "file is empty, no integrity root recorded");
        store.remove_root(&file_id)?;
        None
    } else {
        let root = build_root(&outcome.leaf_digests)?;
        store.write_root(&file_id, &root)?;
        Some(root)
    };

    let manifest = SegmentManifest {
        file_id,
        chunk_size,
        segment_count: outcome.segment_count(),
        total_size: outcome.total_size,
        root,
        created_at: chrono::Utc::now(),
    };
    store.write_manifest(&manifest)?;

    Ok(SplitReport { manifest, outcome })
}

/// Rehash the segments in `store` and compare against the manifest's root.
///
/// A file recorded without a root verifies only when it has no segments.
pub fn verify_stored_segments<S>(store: &S, manifest: &SegmentManifest) -> Result<bool>
where
    S: SegmentStore + Sync + ?Sized,
{
    let Some(expected) = manifest.root else {
        return Ok(manifest.segment_count == 0);
    };
    let leaves = rehash_segments(store, &manifest.file_id, manifest.segment_count)?;
    let actual = build_root(&leaves)?;
    if actual != expected {
        warn!(file_id = %manifest.file_id, %expected, %actual, "segment root mismatch");
    }
    Ok(actual == expected)
}

/// Options for [`merge_segments`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Refuse to merge unless the segments hash to the manifest root
    pub verify: bool,
    /// Remove each segment once it has been appended
    pub cleanup: bool,
}

/// Concatenate segments `0..segment_count` from `source` into `output`.
///
/// Returns the number of bytes written.
pub fn merge_segments<S>(
    manifest: &SegmentManifest,
    source: &S,
    output: &Path,
    options: MergeOptions,
) -> Result<u64>
where
    S: SegmentStore + Sync + ?Sized,
{
    if options.verify {
        if let Some(expected) = manifest.root {
            let leaves = rehash_segments(source, &manifest.file_id, manifest.segment_count)?;
            let actual = build_root(&leaves)?;
            if actual != expected {
                return Err(ChunkProofError::RootMismatch {
                    file_id: manifest.file_id.clone(),
                    expected,
                    actual,
                });
            }
        }
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(output)?);
    let mut written = 0u64;
    for index in 0..manifest.segment_count {
        let bytes = source.read(&manifest.file_id, index)?;
        writer.write_all(&bytes)?;
        written += bytes.len() as u64;
    }
    writer.flush()?;

    if options.cleanup {
        for index in 0..manifest.segment_count {
            source.remove(&manifest.file_id, index)?;
        }
    }

    info!(
        file_id = %manifest.file_id,
        bytes = written,
        output = %output.display(),
        "merged segments"
    );
    Ok(written)
}
