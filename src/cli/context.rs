//! Resolved settings for one command invocation

use crate::cli::Cli;
use crate::config::{validate_chunk_size, GlobalConfig};
use crate::storage::FileSystemStore;
use anyhow::Result;
use std::path::PathBuf;

/// Configuration file merged with command-line overrides
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: GlobalConfig,
    pub config_path: PathBuf,
    pub verbose: bool,
    pub quiet: bool,
    segments_dir_override: Option<PathBuf>,
    chunk_size_override: Option<i64>,
}

impl CliContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = GlobalConfig::get_config_path()?;
        let config = GlobalConfig::load_from(&config_path)?;

        Ok(Self {
            config,
            config_path,
            verbose: cli.verbose,
            quiet: cli.quiet,
            segments_dir_override: cli.segments_dir.clone(),
            chunk_size_override: cli.chunk_size,
        })
    }

    /// Chunk size to split with; `--chunk-size` wins over the config file
    pub fn chunk_size(&self) -> Result<usize> {
        let raw = self
            .chunk_size_override
            .unwrap_or(self.config.core.chunk_size);
        Ok(validate_chunk_size(raw)?)
    }

    pub fn segments_dir(&self) -> PathBuf {
        self.segments_dir_override
            .clone()
            .unwrap_or_else(|| self.config.paths.segments_dir.clone())
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.config.paths.downloads_dir.clone()
    }

    /// Store rooted at the segments directory
    pub fn segment_store(&self) -> FileSystemStore {
        FileSystemStore::new(self.segments_dir())
    }

    /// Print unless `--quiet`
    pub fn say(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{}", message);
        }
    }
}
