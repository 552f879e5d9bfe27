// Configuration validation
//
// Rejects values the pipeline cannot run with and warns about sizes that are
// likely to exhaust memory.

use super::*;
use anyhow::{bail, Result};
use tracing::warn;

const LARGE_ROW_COUNT: u64 = 100_000_000;

pub fn validate_config(config: &RuntimeConfig) -> Result<()> {
    validate_generation_config(&config.generation)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_generation_config(config: &GenerationConfig) -> Result<()> {
    if config.workers == 0 {
        bail!(
            "generation.workers must be greater than 0\n\n\
            How to fix:\n\
              • CLI: rsfake --threads 4\n\
              • Environment: export {}WORKERS=4\n\
              • TOML: [generation]\n              workers = 4",
            ENV_PREFIX
        );
    }

    if config.max_unique_attempts == 0 {
        bail!("generation.max_unique_attempts must be greater than 0");
    }

    // The whole table is materialized in memory before it is written.
    if config.rows > LARGE_ROW_COUNT {
        warn!(
            rows = config.rows,
            "generation.rows is very large; may cause memory issues"
        );
    }

    if config.rows > 0 && config.rows < config.workers as u64 {
        warn!(
            rows = config.rows,
            workers = config.workers,
            "generation.rows is smaller than generation.workers; no rows will be generated"
        );
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<()> {
    if config.path.trim().is_empty() {
        bail!(
            "Output path is required\n\n\
            How to fix:\n\
              • CLI: rsfake --output people.parquet\n\
              • Environment: export {}OUTPUT_PATH=people.parquet\n\
              • TOML: [output]\n              path = \"people.parquet\"",
            ENV_PREFIX
        );
    }

    if config.row_group_size == 0 {
        bail!("output.row_group_size must be greater than 0");
    }

    if config.compression == Compression::Zstd && !(1..=22).contains(&config.zstd_level) {
        bail!(
            "output.zstd_level must be between 1 and 22, got {}",
            config.zstd_level
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = RuntimeConfig::default();
        config.generation.workers = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("generation.workers"));
    }

    #[test]
    fn test_zero_unique_attempts_rejected() {
        let mut config = RuntimeConfig::default();
        config.generation.max_unique_attempts = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_row_group_rejected() {
        let mut config = RuntimeConfig::default();
        config.output.row_group_size = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("row_group_size"));
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let mut config = RuntimeConfig::default();
        config.output.path = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Output path is required"));
    }

    #[test]
    fn test_zstd_level_only_checked_for_zstd() {
        let mut config = RuntimeConfig::default();
        config.output.zstd_level = 99;
        assert!(validate_config(&config).is_ok());

        config.output.compression = Compression::Zstd;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_rows_is_valid() {
        let mut config = RuntimeConfig::default();
        config.generation.rows = 0;
        assert!(validate_config(&config).is_ok());
    }
}
