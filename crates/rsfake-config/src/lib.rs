// rsfake-config - Runtime configuration for the rsfake binary
//
// Supports configuration from multiple sources:
// 1. Environment variables (highest priority)
// 2. Config file path from RSFAKE_CONFIG env var
// 3. Config file contents from RSFAKE_CONFIG_CONTENT env var
// 4. Default config file locations (./rsfake.toml, ./.rsfake.toml)
// 5. Built-in defaults (lowest priority)
//
// Command-line flags are applied on top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{EnvSource, ENV_PREFIX};

use rsfake_core::field::DEFAULT_MAX_UNIQUE_ATTEMPTS;
use rsfake_writer::{DEFAULT_ROW_GROUP_SIZE, DEFAULT_ZSTD_LEVEL};

pub const DEFAULT_ROWS: u64 = 10_000;
pub const DEFAULT_WORKERS: usize = 1;
pub const DEFAULT_OUTPUT_PATH: &str = "people.parquet";

/// Main runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// How many rows to generate and across how many workers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub rows: u64,
    pub workers: usize,
    /// Retry budget for drawing a not-yet-seen email within one partition
    pub max_unique_attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            workers: DEFAULT_WORKERS,
            max_unique_attempts: DEFAULT_MAX_UNIQUE_ATTEMPTS,
        }
    }
}

/// Parquet output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub layout: OutputLayout,
    pub compression: Compression,
    pub zstd_level: i32,
    pub row_group_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            layout: OutputLayout::Single,
            compression: Compression::Snappy,
            zstd_level: DEFAULT_ZSTD_LEVEL,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// One Parquet file at `output.path`
    #[default]
    Single,
    /// `output.path/dataset=0/part-NNNNN.parquet`
    Partitioned,
}

impl std::fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputLayout::Single => write!(f, "single"),
            OutputLayout::Partitioned => write!(f, "partitioned"),
        }
    }
}

impl std::str::FromStr for OutputLayout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "single" | "file" => Ok(OutputLayout::Single),
            "partitioned" | "dataset" => Ok(OutputLayout::Partitioned),
            _ => anyhow::bail!(
                "Unsupported output layout: {}. Supported: single, partitioned",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Snappy,
    Zstd,
    Uncompressed,
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::Snappy => write!(f, "snappy"),
            Compression::Zstd => write!(f, "zstd"),
            Compression::Uncompressed => write!(f, "uncompressed"),
        }
    }
}

impl std::str::FromStr for Compression {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "snappy" => Ok(Compression::Snappy),
            "zstd" => Ok(Compression::Zstd),
            "uncompressed" | "none" => Ok(Compression::Uncompressed),
            _ => anyhow::bail!(
                "Unsupported compression: {}. Supported: snappy, zstd, uncompressed",
                s
            ),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Unsupported log format: {}. Supported: text, json", s),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a specific file path (for CLI usage).
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        sources::load_from_file_path(path)
    }

    /// Load configuration with graceful fallback to defaults.
    ///
    /// Does not fail if no config file is found. A config file that exists but
    /// cannot be read or parsed is skipped and its error returned alongside.
    pub fn load_or_default() -> Result<(Self, Option<anyhow::Error>)> {
        sources::load_or_default()
    }

    /// Merge another config into this one (used for TOML layering).
    pub fn merge(&mut self, other: RuntimeConfig) {
        self.generation = other.generation;
        self.output = other.output;
        self.log = other.log;
    }

    /// Apply environment overrides from a custom source.
    pub fn apply_env_overrides_from<E: EnvSource>(&mut self, env: &E) -> Result<()> {
        env_overrides::apply_env_overrides(self, env)
    }

    /// Build a configuration from optional inline TOML plus overrides supplied
    /// by an `EnvSource`, without touching the host environment or filesystem.
    pub fn load_with_env<E: EnvSource>(inline_config: Option<&str>, env: &E) -> Result<Self> {
        let mut config = RuntimeConfig::default();

        if let Some(inline) = inline_config {
            config.merge(parse_toml(inline).context("Failed to parse inline config content")?);
        }

        config.apply_env_overrides_from(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

pub(crate) fn parse_toml(content: &str) -> Result<RuntimeConfig> {
    Ok(toml::from_str(content)?)
}
