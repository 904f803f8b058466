//! CLI command implementations

pub mod config;
pub mod delete;
pub mod list;
pub mod merge;
pub mod prove;
pub mod root;
pub mod split;
pub mod verify;

// Common utilities for commands
use crate::core::types::FileId;
use anyhow::{Context, Result};

/// Parse a file identifier given on the command line
pub fn parse_file_id(raw: &str) -> Result<FileId> {
    FileId::new(raw).with_context(|| format!("'{}' is not a valid file identifier", raw))
}
