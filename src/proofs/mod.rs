//! Merkle proof system for chunkproof
//!
//! Builds the tree over a file's segment digests and produces or checks
//! inclusion proofs for single segments.

pub mod merkle;
pub mod proof;

// Re-export commonly used items
pub use merkle::{build_root, MerkleTree};
pub use proof::{verify, ProofStep, SegmentProof, PROOF_FORMAT_VERSION};
