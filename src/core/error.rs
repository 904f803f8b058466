//! Error types for chunkproof

use crate::core::types::{FileId, Hash};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chunking, tree and proof operations
#[derive(Error, Debug)]
pub enum ChunkProofError {
    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Merkle tree errors
    #[error("Cannot build a merkle tree from zero leaves")]
    EmptyInput,

    #[error("Leaf index {index} out of range for {leaf_count} leaves")]
    LeafIndexOutOfRange { index: usize, leaf_count: usize },

    /// Proof errors
    #[error("Malformed proof: {reason}")]
    MalformedProof { reason: String },

    #[error("Stored segments of {file_id} hash to {actual}, expected root {expected}")]
    RootMismatch {
        file_id: FileId,
        expected: Hash,
        actual: Hash,
    },

    /// Store errors
    #[error("Invalid file identifier: {file_id:?}")]
    InvalidFileId { file_id: String },

    #[error("Segment {index} of {file_id} not found")]
    SegmentNotFound { file_id: FileId, index: usize },

    #[error("No root digest stored for {file_id}")]
    RootNotFound { file_id: FileId },

    #[error("No manifest stored for {file_id}")]
    ManifestNotFound { file_id: FileId },

    #[error("Corrupted store entry at {path}: {reason}")]
    CorruptedEntry { path: PathBuf, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex encoding error: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl ChunkProofError {
    /// Create a new invalid configuration error
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create a new malformed proof error
    pub fn malformed_proof(reason: impl Into<String>) -> Self {
        Self::MalformedProof {
            reason: reason.into(),
        }
    }

    /// Create a new segment not found error
    pub fn segment_not_found(file_id: &FileId, index: usize) -> Self {
        Self::SegmentNotFound {
            file_id: file_id.clone(),
            index,
        }
    }
}

/// Result type alias for chunkproof operations
pub type Result<T> = std::result::Result<T, ChunkProofError>;
