use rsfake_config::{Compression, EnvSource, LogFormat, OutputLayout, RuntimeConfig};
use std::collections::HashMap;

#[derive(Default)]
struct TestEnv(HashMap<String, String>);

impl TestEnv {
    fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvSource for TestEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

const INLINE: &str = r#"
[generation]
rows = 2000
workers = 2

[output]
path = "out/"
layout = "partitioned"
compression = "zstd"
zstd_level = 3

[log]
level = "warn"
format = "json"
"#;

#[test]
fn defaults_when_nothing_is_set() {
    let config = RuntimeConfig::load_with_env(None, &TestEnv::default()).unwrap();
    assert_eq!(config, RuntimeConfig::default());
}

#[test]
fn inline_toml_replaces_defaults() {
    let config = RuntimeConfig::load_with_env(Some(INLINE), &TestEnv::default()).unwrap();

    assert_eq!(config.generation.rows, 2000);
    assert_eq!(config.generation.workers, 2);
    assert_eq!(config.output.path, "out/");
    assert_eq!(config.output.layout, OutputLayout::Partitioned);
    assert_eq!(config.output.compression, Compression::Zstd);
    assert_eq!(config.output.zstd_level, 3);
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.log.format, LogFormat::Json);
}

#[test]
fn env_wins_over_toml() {
    let env = TestEnv::default()
        .with("WORKERS", "6")
        .with("COMPRESSION", "snappy")
        .with("LOG_FORMAT", "text");

    let config = RuntimeConfig::load_with_env(Some(INLINE), &env).unwrap();

    assert_eq!(config.generation.workers, 6);
    assert_eq!(config.generation.rows, 2000);
    assert_eq!(config.output.compression, Compression::Snappy);
    assert_eq!(config.log.format, LogFormat::Text);
}

#[test]
fn validation_runs_after_env_layering() {
    let env = TestEnv::default().with("WORKERS", "0");
    let err = RuntimeConfig::load_with_env(Some(INLINE), &env).unwrap_err();
    assert!(err.to_string().contains("generation.workers"));
}

#[test]
fn malformed_inline_config_is_reported() {
    let err = RuntimeConfig::load_with_env(Some("generation = 5"), &TestEnv::default())
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("Failed to parse inline config content"));
}

#[test]
fn load_from_path_reads_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsfake.toml");
    std::fs::write(&path, "[generation]\nrows = 77\n").unwrap();

    let config = RuntimeConfig::load_from_path(&path).unwrap();
    // RSFAKE_ROWS is not expected to be set in the test environment
    if std::env::var("RSFAKE_ROWS").is_err() {
        assert_eq!(config.generation.rows, 77);
    }
}
