//! Hash utilities for chunkproof

use crate::core::types::Hash;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Compute SHA-256 hash of data
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Hash::from_bytes(hasher.finalize().into())
}

/// Hash of `left || right`, the parent of two merkle nodes
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    hash_concat(left.as_bytes(), right.as_bytes())
}

/// Hash of two byte strings concatenated in order
pub(crate) fn hash_concat(first: &[u8], second: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(first);
    hasher.update(second);
    Hash::from_bytes(hasher.finalize().into())
}

/// Compute SHA-256 hash of a file
pub fn hash_file(path: &Path) -> io::Result<Hash> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Hash::from_bytes(hasher.finalize().into()))
}
