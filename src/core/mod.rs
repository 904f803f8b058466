//! Core types and utilities for chunkproof
//!
//! This module contains the digest type, error handling,
//! and hashing helpers used throughout the crate.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{ChunkProofError, Result};
pub use hash::{hash_file, hash_pair, sha256};
pub use types::{FileId, Hash, LeafHash, RootHash, SegmentRef, HASH_SIZE};
