//! Core data types for chunkproof

use crate::core::error::{ChunkProofError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Length in bytes of every digest handled by the crate
pub const HASH_SIZE: usize = 32;

/// 32-byte SHA-256 hash
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from a 32-byte array
    pub fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from an arbitrary slice, rejecting anything that is not 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; HASH_SIZE] =
            bytes
                .try_into()
                .map_err(|_| ChunkProofError::MalformedProof {
                    reason: format!("expected {} byte digest, got {}", HASH_SIZE, bytes.len()),
                })?;
        Ok(Hash(array))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Create a Hash from a hex string
    pub fn from_hex(hex: &str) -> std::result::Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex)?;
        if bytes.len() != HASH_SIZE {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut array = [0u8; HASH_SIZE];
        array.copy_from_slice(&bytes);
        Ok(Hash(array))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &hex::encode(self.0)[..8])
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Hex strings on the wire instead of byte arrays
impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        Hash::from_hex(&hex_string).map_err(serde::de::Error::custom)
    }
}

/// Root digest of one chunked file
pub type RootHash = Hash;

/// Digest of a single segment (a merkle leaf)
pub type LeafHash = Hash;

/// Identifier of a chunked file: the base name it was split from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileId(String);

impl FileId {
    /// Validate and wrap a file identifier
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0');
        if invalid {
            return Err(ChunkProofError::InvalidFileId { file_id: name });
        }
        Ok(FileId(name))
    }

    /// Derive the identifier from a path's final component
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ChunkProofError::InvalidFileId {
                file_id: path.display().to_string(),
            })?;
        Self::new(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FileId {
    type Error = ChunkProofError;

    fn try_from(value: String) -> Result<Self> {
        FileId::new(value)
    }
}

impl From<FileId> for String {
    fn from(id: FileId) -> Self {
        id.0
    }
}

/// A segment written by the chunker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRef {
    /// Zero-based position of the segment in the original stream
    pub index: usize,
    /// Where the segment store put the bytes
    pub location: PathBuf,
    /// Size of the segment in bytes
    pub size: usize,
    /// SHA-256 of the segment bytes
    pub digest: LeafHash,
}
