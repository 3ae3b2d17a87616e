//! Configuration for the pager

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DisplayOptions, BASE_CAPACITY, CHUNK_SIZE};
use crate::renderer::StatusStyle;
use crate::tty::WindowSize;

/// Pager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display switches
    pub display: DisplayOptions,
    /// Input buffer sizing
    pub buffer: BufferConfig,
    /// Status line colors
    pub status: StatusStyle,
    /// How long an iteration with no work waits for a key (milliseconds)
    pub idle_poll_ms: u64,
    /// Terminal size assumed when the output is not a terminal
    pub fallback_size: SizeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayOptions::default(),
            buffer: BufferConfig::default(),
            status: StatusStyle::default(),
            idle_poll_ms: 20,
            fallback_size: SizeConfig::default(),
        }
    }
}

/// Input buffer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Initial allocation in bytes
    pub base_capacity: usize,
    /// Bytes read per iteration; also the growth increment
    pub read_chunk: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            base_capacity: BASE_CAPACITY,
            read_chunk: CHUNK_SIZE,
        }
    }
}

/// Terminal dimensions in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    pub cols: u16,
    pub rows: u16,
}

impl Default for SizeConfig {
    fn default() -> Self {
        let size = WindowSize::default();
        Self {
            cols: size.cols,
            rows: size.rows,
        }
    }
}

impl From<SizeConfig> for WindowSize {
    fn from(size: SizeConfig) -> Self {
        WindowSize::new(size.cols, size.rows)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from the default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/bulk/config.json
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(path = %config_path.display(), "ignoring config: {}", e),
                }
            }
        }
        Self::default()
    }
}

/// Default configuration file path
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("bulk")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
