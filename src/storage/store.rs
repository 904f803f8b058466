//! Segment and root stores
//!
//! The chunker and the proof code only talk to these traits. Two backends:
//! a directory per file on disk, and an in-memory map.

use crate::core::{error::*, types::*};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the file holding the raw 32-byte root inside a file's directory
pub const ROOT_HASH_FILE_NAME: &str = "rootHash";

/// Name of the manifest file inside a file's directory
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// What was recorded when a file was split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentManifest {
    pub file_id: FileId,
    /// Chunk size the file was split with
    pub chunk_size: usize,
    /// Number of segments, indices `0..segment_count`
    pub segment_count: usize,
    /// Total size of the original file in bytes
    pub total_size: u64,
    /// Root digest, absent for an empty file
    pub root: Option<RootHash>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Storage for segment bytes
pub trait SegmentStore {
    /// Persist one segment and return where it was written
    fn write(&self, file_id: &FileId, index: usize, bytes: &[u8]) -> Result<PathBuf>;

    /// Read one segment back
    fn read(&self, file_id: &FileId, index: usize) -> Result<Vec<u8>>;

    fn exists(&self, file_id: &FileId, index: usize) -> Result<bool>;

    /// Remove one segment
    fn remove(&self, file_id: &FileId, index: usize) -> Result<()>;

    fn write_manifest(&self, manifest: &SegmentManifest) -> Result<()>;

    fn read_manifest(&self, file_id: &FileId) -> Result<SegmentManifest>;

    /// Files that have a manifest, sorted by identifier
    fn list_files(&self) -> Result<Vec<FileId>>;

    /// Remove everything stored for a file
    fn delete_file(&self, file_id: &FileId) -> Result<()>;
}

/// Storage for a file's root digest
pub trait RootStore {
    fn write_root(&self, file_id: &FileId, root: &RootHash) -> Result<()>;

    fn read_root(&self, file_id: &FileId) -> Result<RootHash>;

    /// Forget a file's root; succeeds when none was stored
    fn remove_root(&self, file_id: &FileId) -> Result<()>;
}

/// Directory-backed store: `<base>/<file_id>/<index>`
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base: PathBuf,
}

impl FileSystemStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Directory holding everything for one file
    pub fn file_dir(&self, file_id: &FileId) -> PathBuf {
        self.base.join(file_id.as_str())
    }

    pub fn segment_path(&self, file_id: &FileId, index: usize) -> PathBuf {
        self.file_dir(file_id).join(index.to_string())
    }

    fn root_path(&self, file_id: &FileId) -> PathBuf {
        self.file_dir(file_id).join(ROOT_HASH_FILE_NAME)
    }

    fn manifest_path(&self, file_id: &FileId) -> PathBuf {
        self.file_dir(file_id).join(MANIFEST_FILE_NAME)
    }
}

fn not_found<T>(result: std::io::Result<T>, missing: impl FnOnce() -> ChunkProofError) -> Result<T> {
    result.map_err(|e| match e.kind() {
        ErrorKind::NotFound => missing(),
        _ => ChunkProofError::Io(e),
    })
}

impl SegmentStore for FileSystemStore {
    fn write(&self, file_id: &FileId, index: usize, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(self.file_dir(file_id))?;
        let path = self.segment_path(file_id, index);
        fs::write(&path, bytes)?;
        debug!(%file_id, index, size = bytes.len(), path = %path.display(), "wrote segment");
        Ok(path)
    }

    fn read(&self, file_id: &FileId, index: usize) -> Result<Vec<u8>> {
        not_found(fs::read(self.segment_path(file_id, index)), || {
            ChunkProofError::segment_not_found(file_id, index)
        })
    }

    fn exists(&self, file_id: &FileId, index: usize) -> Result<bool> {
        Ok(self.segment_path(file_id, index).try_exists()?)
    }

    fn remove(&self, file_id: &FileId, index: usize) -> Result<()> {
        not_found(fs::remove_file(self.segment_path(file_id, index)), || {
            ChunkProofError::segment_not_found(file_id, index)
        })
    }

    fn write_manifest(&self, manifest: &SegmentManifest) -> Result<()> {
        fs::create_dir_all(self.file_dir(&manifest.file_id))?;
        let content = serde_json::to_string_pretty(manifest)?;
        fs::write(self.manifest_path(&manifest.file_id), content)?;
        Ok(())
    }

    fn read_manifest(&self, file_id: &FileId) -> Result<SegmentManifest> {
        let content = not_found(fs::read_to_string(self.manifest_path(file_id)), || {
            ChunkProofError::ManifestNotFound {
                file_id: file_id.clone(),
            }
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn list_files(&self) -> Result<Vec<FileId>> {
        let entries = match fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Ok(file_id) = FileId::new(name) {
                if self.manifest_path(&file_id).is_file() {
                    files.push(file_id);
                }
            }
        }
        files.sort();
        Ok(files)
    }

    fn delete_file(&self, file_id: &FileId) -> Result<()> {
        not_found(fs::remove_dir_all(self.file_dir(file_id)), || {
            ChunkProofError::ManifestNotFound {
                file_id: file_id.clone(),
            }
        })?;
        debug!(%file_id, "deleted file directory");
        Ok(())
    }
}

impl RootStore for FileSystemStore {
    fn write_root(&self, file_id: &FileId, root: &RootHash) -> Result<()> {
        fs::create_dir_all(self.file_dir(file_id))?;
        fs::write(self.root_path(file_id), root.as_bytes())?;
        Ok(())
    }

    fn read_root(&self, file_id: &FileId) -> Result<RootHash> {
        let path = self.root_path(file_id);
        let bytes = not_found(fs::read(&path), || ChunkProofError::RootNotFound {
            file_id: file_id.clone(),
        })?;
        Hash::from_slice(&bytes).map_err(|_| ChunkProofError::CorruptedEntry {
            path,
            reason: format!("root digest is {} bytes", bytes.len()),
        })
    }

    fn remove_root(&self, file_id: &FileId) -> Result<()> {
        match fs::remove_file(self.root_path(file_id)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryFile {
    segments: BTreeMap<usize, Vec<u8>>,
    root: Option<RootHash>,
    manifest: Option<SegmentManifest>,
}

/// In-memory store, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<BTreeMap<FileId, MemoryFile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a stored segment in place without touching the root
    pub fn corrupt_segment(&self, file_id: &FileId, index: usize, bytes: Vec<u8>) -> Result<()> {
        let mut files = self.files.write();
        let segment = files
            .get_mut(file_id)
            .and_then(|f| f.segments.get_mut(&index))
            .ok_or_else(|| ChunkProofError::segment_not_found(file_id, index))?;
        *segment = bytes;
        Ok(())
    }
}

impl SegmentStore for MemoryStore {
    fn write(&self, file_id: &FileId, index: usize, bytes: &[u8]) -> Result<PathBuf> {
        self.files
            .write()
            .entry(file_id.clone())
            .or_default()
            .segments
            .insert(index, bytes.to_vec());
        Ok(PathBuf::from(file_id.as_str()).join(index.to_string()))
    }

    fn read(&self, file_id: &FileId, index: usize) -> Result<Vec<u8>> {
        self.files
            .read()
            .get(file_id)
            .and_then(|f| f.segments.get(&index).cloned())
            .ok_or_else(|| ChunkProofError::segment_not_found(file_id, index))
    }

    fn exists(&self, file_id: &FileId, index: usize) -> Result<bool> {
        Ok(self
            .files
            .read()
            .get(file_id)
            .is_some_and(|f| f.segments.contains_key(&index)))
    }

    fn remove(&self, file_id: &FileId, index: usize) -> Result<()> {
        self.files
            .write()
            .get_mut(file_id)
            .and_then(|f| f.segments.remove(&index))
            .map(|_| ())
            .ok_or_else(|| ChunkProofError::segment_not_found(file_id, index))
    }

    fn write_manifest(&self, manifest: &SegmentManifest) -> Result<()> {
        self.files
            .write()
            .entry(manifest.file_id.clone())
            .or_default()
            .manifest = Some(manifest.clone());
        Ok(())
    }

    fn read_manifest(&self, file_id: &FileId) -> Result<SegmentManifest> {
        self.files
            .read()
            .get(file_id)
            .and_then(|f| f.manifest.clone())
            .ok_or_else(|| ChunkProofError::ManifestNotFound {
                file_id: file_id.clone(),
            })
    }

    fn list_files(&self) -> Result<Vec<FileId>> {
        Ok(self
            .files
            .read()
            .iter()
            .filter(|(_, f)| f.manifest.is_some())
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn delete_file(&self, file_id: &FileId) -> Result<()> {
        self.files
            .write()
            .remove(file_id)
            .map(|_| ())
            .ok_or_else(|| ChunkProofError::ManifestNotFound {
                file_id: file_id.clone(),
            })
    }
}

impl RootStore for MemoryStore {
    fn write_root(&self, file_id: &FileId, root: &RootHash) -> Result<()> {
        self.files.write().entry(file_id.clone()).or_default().root = Some(*root);
        Ok(())
    }

    fn read_root(&self, file_id: &FileId) -> Result<RootHash> {
        self.files
            .read()
            .get(file_id)
            .and_then(|f| f.root)
            .ok_or_else(|| ChunkProofError::RootNotFound {
                file_id: file_id.clone(),
            })
    }

    fn remove_root(&self, file_id: &FileId) -> Result<()> {
        if let Some(file) = self.files.write().get_mut(file_id) {
            file.root = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::sha256;
    use tempfile::TempDir;

    fn manifest(file_id: &FileId, count: usize) -> SegmentManifest {
        SegmentManifest {
            file_id: file_id.clone(),
            chunk_size: 4,
            segment_count: count,
            total_size: 4 * count as u64,
            root: Some(sha256(b"root")),
            created_at: chrono::Utc::now(),
        }
    }

    fn exercise_store<S: SegmentStore + RootStore>(store: &S) {
        let id = FileId::new("data.bin").unwrap();

        assert!(!store.exists(&id, 0).unwrap());
        assert!(matches!(
            store.read(&id, 0),
            Err(ChunkProofError::SegmentNotFound { index: 0, .. })
        ));
        assert!(matches!(
            store.read_root(&id),
            Err(ChunkProofError::RootNotFound { .. })
        ));

        store.write(&id, 0, b"ABCD").unwrap();
        store.write(&id, 1, b"EF").unwrap();
        assert!(store.exists(&id, 1).unwrap());
        assert_eq!(store.read(&id, 1).unwrap(), b"EF");

        let root = sha256(b"root");
        store.write_root(&id, &root).unwrap();
        assert_eq!(store.read_root(&id).unwrap(), root);
        store.remove_root(&id).unwrap();
        assert!(matches!(
            store.read_root(&id),
            Err(ChunkProofError::RootNotFound { .. })
        ));
        store.remove_root(&id).unwrap();
        store.write_root(&id, &root).unwrap();

        assert!(store.list_files().unwrap().is_empty());
        store.write_manifest(&manifest(&id, 2)).unwrap();
        assert_eq!(store.read_manifest(&id).unwrap().segment_count, 2);
        assert_eq!(store.list_files().unwrap(), vec![id.clone()]);

        store.remove(&id, 1).unwrap();
        assert!(!store.exists(&id, 1).unwrap());

        store.delete_file(&id).unwrap();
        assert!(!store.exists(&id, 0).unwrap());
        assert!(store.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store() {
        exercise_store(&MemoryStore::new());
    }

    #[test]
    fn test_file_system_store() {
        let temp_dir = TempDir::new().unwrap();
        exercise_store(&FileSystemStore::new(temp_dir.path().join("segments")));
    }

    #[test]
    fn test_file_system_layout() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path());
        let id = FileId::new("a.txt").unwrap();

        let path = store.write(&id, 3, b"xyz").unwrap();
        assert_eq!(path, temp_dir.path().join("a.txt").join("3"));

        let root = sha256(b"r");
        store.write_root(&id, &root).unwrap();
        let raw = std::fs::read(temp_dir.path().join("a.txt").join(ROOT_HASH_FILE_NAME)).unwrap();
        assert_eq!(raw, root.as_bytes());
    }

    #[test]
    fn test_corrupted_root_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path());
        let id = FileId::new("a.txt").unwrap();
        std::fs::create_dir_all(store.file_dir(&id)).unwrap();
        std::fs::write(store.file_dir(&id).join(ROOT_HASH_FILE_NAME), b"short").unwrap();

        assert!(matches!(
            store.read_root(&id),
            Err(ChunkProofError::CorruptedEntry { .. })
        ));
    }

    #[test]
    fn test_list_missing_base_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(temp_dir.path().join("nope"));
        assert!(store.list_files().unwrap().is_empty());
    }
}
