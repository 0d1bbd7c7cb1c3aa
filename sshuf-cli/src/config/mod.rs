//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sshuf_core::ShuffleConfig;
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Shuffle algorithm configuration
    #[serde(default)]
    pub shuffle: ShuffleConfig,

    /// Input/output configuration
    #[serde(default)]
    pub io: IoConfig,
}

/// Record framing and buffering configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct IoConfig {
    /// Use NUL instead of newline as the record delimiter
    pub zero_terminated: bool,

    /// Read buffer size (KB)
    pub read_buffer_kb: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            zero_terminated: false,
            read_buffer_kb: 64,
        }
    }
}

impl IoConfig {
    /// Record delimiter byte
    pub fn delimiter(&self) -> u8 {
        if self.zero_terminated {
            b'\0'
        } else {
            b'\n'
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
