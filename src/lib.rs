//! chunkproof - content integrity for chunked file transfer
//!
//! Splits a file into fixed-size segments, builds a binary SHA-256 merkle tree
//! over the segment digests and records its root. Any single segment can later be
//! checked against that root with a short inclusion proof, without the rest of
//! the file.
//!
//! # Core Features
//!
//! - **Chunking**: fixed-size segments hashed and persisted in stream order
//! - **Merkle Roots**: odd levels pair their last node with itself
//! - **Inclusion Proofs**: sibling paths with explicit left/right ordering
//! - **Stores**: directory-backed and in-memory segment/root stores
//!
//! # Example Usage
//!
//! ```rust
//! use chunkproof::{proofs::verify, Chunker, FileId, MemoryStore, MerkleTree};
//!
//! let store = MemoryStore::new();
//! let file_id = FileId::new("letters.txt")?;
//! let outcome = Chunker::new(4)?.split_bytes(b"ABCDEFGHI", &file_id, &store)?;
//!
//! let tree = MerkleTree::build(&outcome.leaf_digests)?;
//! let path = tree.proof(0)?;
//! assert!(verify(&tree.root(), &outcome.leaf_digests[0], &path)?);
//! # Ok::<(), chunkproof::ChunkProofError>(())
//! ```

#![allow(clippy::should_implement_trait)]

pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    error::{ChunkProofError, Result},
    types::{FileId, Hash, SegmentRef},
};

pub use storage::{
    chunk::{Chunker, SplitOutcome},
    store::{FileSystemStore, MemoryStore, RootStore, SegmentManifest, SegmentStore},
};

pub use proofs::{
    merkle::{build_root, MerkleTree},
    proof::{ProofStep, SegmentProof},
};
