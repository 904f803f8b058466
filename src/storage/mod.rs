//! Storage layer for chunkproof
//!
//! Fixed-size chunking, the segment/root stores it writes to, and
//! whole-file split and merge operations.

pub mod chunk;
pub mod ingest;
pub mod store;

pub use chunk::{rehash_segments, Chunker, SplitOutcome, DEFAULT_CHUNK_SIZE};
pub use ingest::{merge_segments, split_file, verify_stored_segments, MergeOptions, SplitReport};
pub use store::{FileSystemStore, MemoryStore, RootStore, SegmentManifest, SegmentStore};
