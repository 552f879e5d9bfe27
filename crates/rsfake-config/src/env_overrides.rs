use super::{Compression, LogFormat, OutputLayout, RuntimeConfig};
use anyhow::{anyhow, Context, Result};
use std::str::FromStr;

pub const ENV_PREFIX: &str = "RSFAKE_";

/// Abstraction over environment-variable lookups so tests (and embedders) can
/// supply their own source of overrides.
pub trait EnvSource {
    /// Get a variable by its key without the `RSFAKE_` prefix
    fn get(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides (highest priority below CLI flags).
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // Generation
    if let Some(val) = get_env_parsed::<_, u64>(env, "ROWS")? {
        config.generation.rows = val;
    }
    if let Some(val) = get_env_parsed::<_, usize>(env, "WORKERS")? {
        config.generation.workers = val;
    }
    if let Some(val) = get_env_parsed::<_, usize>(env, "MAX_UNIQUE_ATTEMPTS")? {
        config.generation.max_unique_attempts = val;
    }

    // Output
    if let Some(path) = env.get("OUTPUT_PATH") {
        config.output.path = path;
    }
    if let Some(layout) = env.get("OUTPUT_LAYOUT") {
        config.output.layout = layout
            .parse::<OutputLayout>()
            .context("Invalid RSFAKE_OUTPUT_LAYOUT value")?;
    }
    if let Some(compression) = env.get("COMPRESSION") {
        config.output.compression = compression
            .parse::<Compression>()
            .context("Invalid RSFAKE_COMPRESSION value")?;
    }
    if let Some(val) = get_env_parsed::<_, i32>(env, "ZSTD_LEVEL")? {
        config.output.zstd_level = val;
    }
    if let Some(val) = get_env_parsed::<_, usize>(env, "ROW_GROUP_SIZE")? {
        config.output.row_group_size = val;
    }

    // Logging
    if let Some(level) = env.get("LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = env.get("LOG_FORMAT") {
        config.log.format = format
            .parse::<LogFormat>()
            .context("Invalid RSFAKE_LOG_FORMAT value")?;
    }

    Ok(())
}

fn get_env_parsed<E, T>(env: &E, key: &str) -> Result<Option<T>>
where
    E: EnvSource,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env.get(key) {
        Some(val) => {
            let parsed = val
                .trim()
                .parse::<T>()
                .map_err(|e| anyhow!("Failed to parse {}{}: {}", ENV_PREFIX, key, e))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
