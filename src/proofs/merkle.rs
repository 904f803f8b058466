//! Merkle tree implementation
//!
//! Binary SHA-256 tree over an ordered list of leaf digests. A level with an odd
//! number of nodes pairs its last node with itself; parents are `H(left || right)`.

use crate::core::{error::*, hash::hash_pair, types::*};
use crate::proofs::proof::ProofStep;
use tracing::debug;

/// Compute the root of the tree over `leaves` without keeping the levels.
///
/// A single leaf is its own root. Zero leaves is `EmptyInput`.
pub fn build_root(leaves: &[Hash]) -> Result<Hash> {
    if leaves.is_empty() {
        return Err(ChunkProofError::EmptyInput);
    }

    let mut level: Vec<Hash> = leaves.to_vec();
    while level.len() > 1 {
        level = parent_level(&level);
    }
    Ok(level[0])
}

/// Hash one level into a fresh vector of parents
fn parent_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(left, right),
            [lone] => hash_pair(lone, lone),
            _ => unreachable!("chunks(2) yields one or two nodes"),
        })
        .collect()
}

/// Merkle tree for generating proofs
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// All levels of the tree (leaves at index 0, root level last)
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a merkle tree from an ordered list of leaf digests
    pub fn build(leaves: &[Hash]) -> Result<Self> {
        if leaves.is_empty() {
            return Err(ChunkProofError::EmptyInput);
        }

        let mut levels = vec![leaves.to_vec()];
        while let Some(top) = levels.last().filter(|level| level.len() > 1) {
            let next = parent_level(top);
            levels.push(next);
        }

        debug!(
            leaves = leaves.len(),
            depth = levels.len() - 1,
            "built merkle tree"
        );
        Ok(Self { levels })
    }

    /// Root digest of the tree
    pub fn root(&self) -> Hash {
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of leaves the tree was built from
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels between the leaves and the root
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.levels[0]
    }

    /// Generate the proof path for a leaf, bottom level first.
    ///
    /// The path is empty for a single-leaf tree.
    pub fn proof(&self, leaf_index: usize) -> Result<Vec<ProofStep>> {
        if leaf_index >= self.leaf_count() {
            return Err(ChunkProofError::LeafIndexOutOfRange {
                index: leaf_index,
                leaf_count: self.leaf_count(),
            });
        }

        let mut path = Vec::with_capacity(self.depth());
        let mut index = leaf_index;
        for level in &self.levels[..self.depth()] {
            let step = if index % 2 == 0 {
                // Last node of an odd level is paired with itself
                let sibling = level.get(index + 1).unwrap_or(&level[index]);
                ProofStep::new(*sibling, true)
            } else {
                ProofStep::new(level[index - 1], false)
            };
            path.push(step);
            index /= 2;
        }
        Ok(path)
    }
}
