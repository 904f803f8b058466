//! Proof generation and verification

use crate::core::{error::*, hash::hash_concat, types::*};
use crate::proofs::merkle::MerkleTree;
use crate::storage::chunk::rehash_segments;
use crate::storage::store::{RootStore, SegmentStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Version string written into every proof document
pub const PROOF_FORMAT_VERSION: &str = "1.0";

/// A single element in a merkle proof path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Digest of the sibling node. Raw bytes so a malformed length survives decoding
    /// and is rejected by [`verify`].
    #[serde(with = "hex::serde")]
    pub sibling: Vec<u8>,
    /// The sibling sits to the right of the running hash at this level
    pub is_right_sibling: bool,
}

impl ProofStep {
    pub fn new(sibling: Hash, is_right_sibling: bool) -> Self {
        Self {
            sibling: sibling.as_bytes().to_vec(),
            is_right_sibling,
        }
    }
}

/// Verify that `leaf` is included under `root` by folding `path` bottom-up.
///
/// Returns `Ok(false)` when the path does not reproduce the root and
/// `MalformedProof` when a sibling is not a 32-byte digest. An empty path is
/// the single-leaf case: valid iff the leaf is the root.
pub fn verify(root: &Hash, leaf: &Hash, path: &[ProofStep]) -> Result<bool> {
    let mut running = *leaf;
    for (level, step) in path.iter().enumerate() {
        if step.sibling.len() != HASH_SIZE {
            return Err(ChunkProofError::malformed_proof(format!(
                "sibling at level {} is {} bytes, expected {}",
                level,
                step.sibling.len(),
                HASH_SIZE
            )));
        }
        running = if step.is_right_sibling {
            hash_concat(running.as_bytes(), &step.sibling)
        } else {
            hash_concat(&step.sibling, running.as_bytes())
        };
    }
    Ok(running == *root)
}

/// Proof that one segment of a chunked file belongs to the file's root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentProof {
    /// Version of the proof format
    pub version: String,
    /// File the segment belongs to
    pub file_id: FileId,
    /// Zero-based segment index
    pub segment_index: usize,
    /// Digest of the segment bytes
    pub leaf: LeafHash,
    /// Root digest the proof folds up to
    pub root: RootHash,
    /// Sibling path from the leaf level up to the root
    pub path: Vec<ProofStep>,
    /// Unix timestamp when the proof was generated
    pub generated_at: i64,
}

impl SegmentProof {
    /// Wrap a tree's proof for one leaf into a proof document
    pub fn from_tree(tree: &MerkleTree, file_id: FileId, segment_index: usize) -> Result<Self> {
        let path = tree.proof(segment_index)?;
        Ok(Self {
            version: PROOF_FORMAT_VERSION.to_string(),
            file_id,
            segment_index,
            leaf: tree.leaves()[segment_index],
            root: tree.root(),
            path,
            generated_at: chrono::Utc::now().timestamp(),
        })
    }

    /// Generate a proof from stored segments.
    ///
    /// The segments are rehashed and the rebuilt root must equal the stored one;
    /// a store whose segments drifted from its root produces no proof.
    pub fn generate<S>(store: &S, file_id: &FileId, segment_index: usize) -> Result<Self>
    where
        S: SegmentStore + RootStore + Sync,
    {
        let manifest = store.read_manifest(file_id)?;
        let stored_root = store.read_root(file_id)?;

        let leaves = rehash_segments(store, file_id, manifest.segment_count)?;
        let tree = MerkleTree::build(&leaves)?;
        if tree.root() != stored_root {
            warn!(%file_id, expected = %stored_root, actual = %tree.root(), "stored segments do not match root");
            return Err(ChunkProofError::RootMismatch {
                file_id: file_id.clone(),
                expected: stored_root,
                actual: tree.root(),
            });
        }

        debug!(%file_id, segment_index, depth = tree.depth(), "generated segment proof");
        Self::from_tree(&tree, file_id.clone(), segment_index)
    }

    /// Check that the proof is internally consistent: its path folds its own
    /// `leaf` up to its own `root`.
    ///
    /// Both values come from the document, so this proves nothing about the
    /// data. Use [`SegmentProof::verify_against`] with a trusted root and
    /// [`SegmentProof::verify_leaf`] with the digest of the segment actually held.
    pub fn verify(&self) -> Result<bool> {
        verify(&self.root, &self.leaf, &self.path)
    }

    /// Verify against a root obtained independently (e.g. from the local root store).
    ///
    /// A proof claiming a different root than the trusted one is invalid.
    pub fn verify_against(&self, trusted_root: &Hash) -> Result<bool> {
        if self.root != *trusted_root {
            return Ok(false);
        }
        verify(trusted_root, &self.leaf, &self.path)
    }

    /// Verify a locally computed leaf digest against a trusted root
    pub fn verify_leaf(&self, leaf: &Hash, trusted_root: &Hash) -> Result<bool> {
        verify(trusted_root, leaf, &self.path)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
