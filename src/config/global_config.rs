//! Global configuration management
//!
//! Stored in ~/.chunkproof/config.toml, or wherever `CHUNKPROOF_CONFIG` points.

use crate::core::error::{ChunkProofError, Result};
use crate::storage::chunk::DEFAULT_CHUNK_SIZE;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "CHUNKPROOF_CONFIG";

/// Global configuration for chunkproof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Chunking configuration
    pub core: CoreConfig,
    /// Directory configuration
    pub paths: PathsConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Segment size in bytes. Signed so a bad value in the file is reported
    /// instead of failing to parse.
    pub chunk_size: i64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE as i64,
        }
    }
}

/// Where segments and downloads live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub segments_dir: PathBuf,
    pub downloads_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            segments_dir: PathBuf::from("segments"),
            downloads_dir: PathBuf::from("downloads"),
        }
    }
}

/// Configuration key for getting and setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    CoreChunkSize,
    PathsSegmentsDir,
    PathsDownloadsDir,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::CoreChunkSize,
        ConfigKey::PathsSegmentsDir,
        ConfigKey::PathsDownloadsDir,
    ];

    pub fn from_str(key: &str) -> Option<Self> {
        match key {
            "core.chunk_size" => Some(ConfigKey::CoreChunkSize),
            "paths.segments_dir" => Some(ConfigKey::PathsSegmentsDir),
            "paths.downloads_dir" => Some(ConfigKey::PathsDownloadsDir),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            ConfigKey::CoreChunkSize => "core.chunk_size",
            ConfigKey::PathsSegmentsDir => "paths.segments_dir",
            ConfigKey::PathsDownloadsDir => "paths.downloads_dir",
        }
    }
}

impl GlobalConfig {
    /// Load configuration from a file; a missing file yields defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: GlobalConfig = toml::from_str(&content).map_err(|e| {
            ChunkProofError::invalid_configuration(format!("Failed to parse config: {}", e))
        })?;
        config.validated_chunk_size()?;

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ChunkProofError::invalid_configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let user_dirs = UserDirs::new().ok_or(ChunkProofError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".chunkproof").join("config.toml"))
    }

    /// Chunk size as a usable value; zero or negative is a configuration error
    pub fn validated_chunk_size(&self) -> Result<usize> {
        validate_chunk_size(self.core.chunk_size)
    }

    /// Get a configuration value rendered as a string
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::CoreChunkSize => self.core.chunk_size.to_string(),
            ConfigKey::PathsSegmentsDir => self.paths.segments_dir.display().to_string(),
            ConfigKey::PathsDownloadsDir => self.paths.downloads_dir.display().to_string(),
        }
    }

    /// Set a configuration value from its string form
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::CoreChunkSize => {
                let size: i64 = value.parse().map_err(|_| {
                    ChunkProofError::invalid_configuration("core.chunk_size must be a number")
                })?;
                validate_chunk_size(size)?;
                self.core.chunk_size = size;
            }
            ConfigKey::PathsSegmentsDir => self.paths.segments_dir = non_empty_path(key, value)?,
            ConfigKey::PathsDownloadsDir => {
                self.paths.downloads_dir = non_empty_path(key, value)?
            }
        }
        Ok(())
    }
}

/// Turn a raw chunk size into a positive `usize`
pub fn validate_chunk_size(size: i64) -> Result<usize> {
    if size <= 0 {
        return Err(ChunkProofError::invalid_configuration(format!(
            "chunk size must be positive, got {}",
            size
        )));
    }
    usize::try_from(size).map_err(|_| {
        ChunkProofError::invalid_configuration(format!("chunk size {} is too large", size))
    })
}

fn non_empty_path(key: ConfigKey, value: &str) -> Result<PathBuf> {
    if value.trim().is_empty() {
        return Err(ChunkProofError::invalid_configuration(format!(
            "{} must not be empty",
            key.to_str()
        )));
    }
    Ok(PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GlobalConfig::default();
        assert_eq!(config.validated_chunk_size().unwrap(), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.paths.segments_dir, PathBuf::from("segments"));
        assert_eq!(config.paths.downloads_dir, PathBuf::from("downloads"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = GlobalConfig::load_from(&temp_dir.path().join("none.toml")).unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = GlobalConfig::default();
        config.set(ConfigKey::CoreChunkSize, "4096").unwrap();
        config.set(ConfigKey::PathsSegmentsDir, "/var/segments").unwrap();
        config.save_to(&path).unwrap();

        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(loaded.core.chunk_size, 4096);
        assert_eq!(loaded.get(ConfigKey::PathsSegmentsDir), "/var/segments");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[core]\nchunk_size = 1024\n").unwrap();

        let config = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(config.core.chunk_size, 1024);
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn test_non_positive_chunk_size_rejected() {
        for bad in ["0", "-5"] {
            let mut config = GlobalConfig::default();
            assert!(matches!(
                config.set(ConfigKey::CoreChunkSize, bad),
                Err(ChunkProofError::InvalidConfiguration { .. })
            ));
        }

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[core]\nchunk_size = -1\n").unwrap();
        assert!(matches!(
            GlobalConfig::load_from(&path),
            Err(ChunkProofError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_key_names_roundtrip() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_str(key.to_str()), Some(key));
        }
        assert_eq!(ConfigKey::from_str("user.name"), None);
    }
}
