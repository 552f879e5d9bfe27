// End-to-end tests for the rsfake binary
//
// Runs the built executable in a scratch directory and checks its output
// files and console report.

use std::path::Path;
use std::process::{Command, Output};

fn rsfake(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rsfake"))
        .args(args)
        .current_dir(dir)
        .env_remove("RSFAKE_CONFIG")
        .env_remove("RSFAKE_CONFIG_CONTENT")
        .env_remove("RSFAKE_ROWS")
        .env_remove("RSFAKE_WORKERS")
        .env_remove("RSFAKE_OUTPUT_PATH")
        .env_remove("RSFAKE_OUTPUT_LAYOUT")
        .output()
        .expect("Failed to run rsfake")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_version_flag_exits_without_running() {
    let dir = tempfile::tempdir().unwrap();
    let output = rsfake(dir.path(), &["-V"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
    assert!(!dir.path().join("people.parquet").exists());
}

#[test]
fn test_help_lists_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = rsfake(dir.path(), &["--help"]);

    assert!(output.status.success());
    let help = stdout(&output);
    for flag in ["--rows", "--threads", "--output", "--input", "--partitioned"] {
        assert!(help.contains(flag), "help is missing {}", flag);
    }
}

#[test]
fn test_generate_single_file_drops_remainder() {
    let dir = tempfile::tempdir().unwrap();
    let output = rsfake(dir.path(), &["-r", "7", "-t", "3", "-o", "people.parquet"]);

    assert!(output.status.success(), "{:?}", output);
    let report = stdout(&output);
    assert!(report.contains("shape: (6, 6)"));
    assert!(report.contains("seconds ---"));

    let table = rsfake_writer::read_table(dir.path().join("people.parquet")).unwrap();
    assert_eq!(table.len(), 6);
}

#[test]
fn test_default_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = rsfake(dir.path(), &["-r", "25"]);

    assert!(output.status.success(), "{:?}", output);
    let table = rsfake_writer::read_table(dir.path().join("people.parquet")).unwrap();
    assert_eq!(table.len(), 25);
}

#[test]
fn test_partitioned_output_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let output = rsfake(dir.path(), &["-r", "40", "-t", "4", "-o", "dataset/"]);
    assert!(output.status.success(), "{:?}", output);

    let parts = std::fs::read_dir(dir.path().join("dataset").join("dataset=0"))
        .unwrap()
        .count();
    assert_eq!(parts, 4);

    let output = rsfake(dir.path(), &["-i", "dataset"]);
    assert!(output.status.success(), "{:?}", output);
    let report = stdout(&output);
    assert!(report.contains("shape: (40, 6)"));
    assert!(report.contains("Time taken to read from Parquet"));
}

#[test]
fn test_zero_workers_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = rsfake(dir.path(), &["-r", "10", "-t", "0"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("people.parquet").exists());
}

#[test]
fn test_config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("custom.toml"),
        "[generation]\nrows = 12\nworkers = 2\n\n[output]\npath = \"from-config.parquet\"\ncompression = \"zstd\"\n",
    )
    .unwrap();

    let output = rsfake(dir.path(), &["-c", "custom.toml"]);
    assert!(output.status.success(), "{:?}", output);

    let table = rsfake_writer::read_table(dir.path().join("from-config.parquet")).unwrap();
    assert_eq!(table.len(), 12);
}

#[test]
fn test_malformed_default_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rsfake.toml"), "[generation\nrows = ").unwrap();

    let output = rsfake(dir.path(), &["-r", "5"]);
    assert!(output.status.success(), "{:?}", output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ignoring config file"), "{}", stderr);
    assert!(stderr.contains("rsfake.toml"), "{}", stderr);
}

#[test]
fn test_partitioned_output_over_existing_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("out"), b"taken").unwrap();

    let output = rsfake(dir.path(), &["-r", "4", "-o", "out/"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E004"), "{}", stderr);
}
