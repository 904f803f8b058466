//! Fixed-size chunking
//!
//! Splits a byte stream into `chunk_size` segments, hashing and persisting each one
//! in stream order before reading the next.

use crate::core::{error::*, hash::sha256, types::*};
use crate::storage::store::SegmentStore;
use rayon::prelude::*;
use std::io::Read;
use tracing::{debug, info};

/// Chunk size used when nothing else is configured
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Result of splitting one stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Segments in stream order
    pub segments: Vec<SegmentRef>,
    /// `leaf_digests[i]` is the digest of `segments[i]`
    pub leaf_digests: Vec<LeafHash>,
    /// Total number of bytes read
    pub total_size: u64,
}

impl SplitOutcome {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Locations of the written segments, in order
    pub fn segment_paths(&self) -> Vec<&std::path::Path> {
        self.segments.iter().map(|s| s.location.as_path()).collect()
    }
}

/// Fixed-size chunking engine
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
}

impl Chunker {
    /// Create a chunker. A zero chunk size is rejected.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ChunkProofError::invalid_configuration(
                "chunk size must be positive",
            ));
        }
        Ok(Self { chunk_size })
    }

    /// Split `reader` into segments written to `store` under `file_id`.
    ///
    /// Any read or write error stops the split immediately; segments written so
    /// far stay in the store.
    pub fn split<R, S>(&self, mut reader: R, file_id: &FileId, store: &S) -> Result<SplitOutcome>
    where
        R: Read,
        S: SegmentStore + ?Sized,
    {
        let mut outcome = SplitOutcome::default();
        // Sized by what was read, not by `chunk_size`
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            let n = (&mut reader)
                .take(self.chunk_size as u64)
                .read_to_end(&mut buffer)?;
            if n == 0 {
                break;
            }

            let bytes = buffer.as_slice();
            let index = outcome.segments.len();
            let digest = sha256(bytes);
            let location = store.write(file_id, index, bytes)?;

            outcome.segments.push(SegmentRef {
                index,
                location,
                size: n,
                digest,
            });
            outcome.leaf_digests.push(digest);
            outcome.total_size += n as u64;

            if n < self.chunk_size {
                break;
            }
        }

        info!(
            %file_id,
            segments = outcome.segment_count(),
            bytes = outcome.total_size,
            chunk_size = self.chunk_size,
            "split complete"
        );
        Ok(outcome)
    }

    /// Split an in-memory buffer
    pub fn split_bytes<S>(&self, data: &[u8], file_id: &FileId, store: &S) -> Result<SplitOutcome>
    where
        S: SegmentStore + ?Sized,
    {
        self.split(data, file_id, store)
    }
}

/// Read back segments `0..count` and hash them in parallel, preserving order
pub fn rehash_segments<S>(store: &S, file_id: &FileId, count: usize) -> Result<Vec<LeafHash>>
where
    S: SegmentStore + Sync + ?Sized,
{
    debug!(%file_id, count, "rehashing stored segments");
    (0..count)
        .into_par_iter()
        .map(|index| store.read(file_id, index).map(|bytes| sha256(&bytes)))
        .collect()
}
