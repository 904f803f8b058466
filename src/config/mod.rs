//! Configuration management for chunkproof
//!
//! Chunk size and directory locations, stored in ~/.chunkproof/config.toml

pub mod global_config;

// Re-export commonly used items
pub use global_config::{validate_chunk_size, ConfigKey, GlobalConfig, CONFIG_PATH_ENV};
