// Configuration source loading from the host environment and filesystem.
//
// Priority order:
// 1. Environment variables (RSFAKE_* prefix)
// 2. Config file path from RSFAKE_CONFIG
// 3. Inline config content from RSFAKE_CONFIG_CONTENT
// 4. Default config files (./rsfake.toml, ./.rsfake.toml)
// 5. Built-in defaults

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::{parse_toml, RuntimeConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

const DEFAULT_CONFIG_FILES: [&str; 2] = ["./rsfake.toml", "./.rsfake.toml"];

fn load_from_file<E: EnvSource>(env: &E, default_files: &[&Path]) -> Result<Option<RuntimeConfig>> {
    if let Some(path) = env.get("CONFIG") {
        return read_config_file(Path::new(&path)).map(Some);
    }

    if let Some(content) = env.get("CONFIG_CONTENT") {
        let config = parse_toml(&content)
            .context("Failed to parse inline config from RSFAKE_CONFIG_CONTENT")?;
        return Ok(Some(config));
    }

    for path in default_files {
        if path.exists() {
            return read_config_file(path).map(Some);
        }
    }

    Ok(None)
}

fn read_config_file(path: &Path) -> Result<RuntimeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from a specific file path (for CLI --config flag).
/// Returns error if the file doesn't exist or can't be parsed.
/// Environment overrides still apply on top of the file.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::default();
    config.merge(read_config_file(path.as_ref())?);

    env_overrides::apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration with graceful fallback to defaults.
pub fn load_or_default() -> Result<(RuntimeConfig, Option<anyhow::Error>)> {
    let default_files = DEFAULT_CONFIG_FILES.map(Path::new);
    load_or_default_with(&StdEnvSource, &default_files)
}

/// Unreadable or malformed config files are skipped; the error is handed
/// back so the caller can report it once logging is up.
pub(crate) fn load_or_default_with<E: EnvSource>(
    env: &E,
    default_files: &[&Path],
) -> Result<(RuntimeConfig, Option<anyhow::Error>)> {
    let mut config = RuntimeConfig::default();

    let skipped = match load_from_file(env, default_files) {
        Ok(Some(file_config)) => {
            config.merge(file_config);
            None
        }
        Ok(None) => None,
        Err(e) => Some(e),
    };

    env_overrides::apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok((config, skipped))
}

pub(crate) struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compression, OutputLayout};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapEnv(HashMap<&'static str, String>);

    impl EnvSource for MapEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    #[test]
    fn malformed_default_file_is_skipped_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsfake.toml");
        std::fs::write(&path, "[generation\nrows = ").unwrap();

        let (config, skipped) =
            load_or_default_with(&MapEnv::default(), &[path.as_path()]).unwrap();

        assert_eq!(config, RuntimeConfig::default());
        let skipped = skipped.expect("malformed file should be reported");
        assert!(format!("{:#}", skipped).contains("rsfake.toml"));
    }

    #[test]
    fn first_existing_default_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rsfake.toml");
        let hidden = dir.path().join(".rsfake.toml");
        std::fs::write(&hidden, "[generation]\nrows = 9\n").unwrap();

        let (config, skipped) =
            load_or_default_with(&MapEnv::default(), &[missing.as_path(), hidden.as_path()])
                .unwrap();

        assert!(skipped.is_none());
        assert_eq!(config.generation.rows, 9);
    }

    #[test]
    fn inline_content_beats_default_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsfake.toml");
        std::fs::write(&path, "[generation]\nrows = 9\n").unwrap();

        let mut env = MapEnv::default();
        env.0
            .insert("CONFIG_CONTENT", "[generation]\nrows = 3\n".to_string());

        let (config, _) = load_or_default_with(&env, &[path.as_path()]).unwrap();
        assert_eq!(config.generation.rows, 3);
    }

    #[test]
    fn reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[generation]\nrows = 42\n\n[output]\nlayout = \"partitioned\"\ncompression = \"uncompressed\"\n",
        )
        .unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.generation.rows, 42);
        assert_eq!(config.output.layout, OutputLayout::Partitioned);
        assert_eq!(config.output.compression, Compression::Uncompressed);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[generation\nrows = ").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
