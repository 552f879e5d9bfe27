use anyhow::{Context, Result};
use clap::Parser;
use rsfake_config::{Compression, OutputLayout, RuntimeConfig};
use rsfake_core::ColumnarTable;
use rsfake_pipeline::WorkerPool;
use rsfake_writer::{read_dataset, Codec, TableWriter, WriterOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

mod init;
mod report;

/// Tokio's default blocking pool size; raised when more workers are requested
const MIN_BLOCKING_THREADS: usize = 512;
const DATASET_ID: &str = "0";

/// Generates fake person records in parallel and writes them to Parquet
#[derive(Parser)]
#[command(name = "rsfake")]
#[command(version)]
#[command(
    about = "Generates fake person records in parallel and writes them to Parquet",
    long_about = None
)]
struct Cli {
    /// Number of rows to generate
    #[arg(short, long, value_name = "NUM_ROWS")]
    rows: Option<u64>,

    /// Number of workers; rows are split evenly and any remainder is dropped
    #[arg(short = 't', long = "threads", visible_alias = "workers", value_name = "NUM")]
    threads: Option<usize>,

    /// Output path; a trailing '/' selects the partitioned layout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Read an existing Parquet file or partitioned dataset instead of generating
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Write `dataset=0/part-NNNNN.parquet` files under the output path
    #[arg(long)]
    partitioned: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Step 1: Load base configuration
    let (mut config, skipped_config) = if let Some(config_path) = &cli.config {
        let config = RuntimeConfig::load_from_path(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        (config, None)
    } else {
        RuntimeConfig::load_or_default().context("Failed to load configuration")?
    };

    // Step 2: Apply CLI overrides (highest priority)
    apply_cli_overrides(&mut config, &cli);

    // Step 3: Initialize tracing so load and validation warnings are visible
    init::init_tracing(&config);
    if let Some(err) = skipped_config {
        warn!("Ignoring config file: {:#}", err);
    }
    config.validate()?;

    display_startup_info(&config, &cli);

    let table = match &cli.input {
        Some(input) => read_input(input)?,
        None => generate(&config)?,
    };

    // Reading only writes back out when an output path was given explicitly
    if cli.input.is_none() || cli.output.is_some() {
        write_output(&table, &config)?;
    }

    Ok(())
}

fn apply_cli_overrides(config: &mut RuntimeConfig, cli: &Cli) {
    if let Some(rows) = cli.rows {
        config.generation.rows = rows;
    }
    if let Some(threads) = cli.threads {
        config.generation.workers = threads;
    }
    if let Some(output) = &cli.output {
        let output = output.to_string_lossy().to_string();
        if output.ends_with('/') {
            config.output.layout = OutputLayout::Partitioned;
        }
        config.output.path = output;
    }
    if cli.partitioned {
        config.output.layout = OutputLayout::Partitioned;
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
}

fn display_startup_info(config: &RuntimeConfig, cli: &Cli) {
    info!("rsfake v{}", env!("CARGO_PKG_VERSION"));
    match &cli.input {
        Some(input) => info!("Input: {}", input.display()),
        None => info!(
            "Generating {} rows with {} workers",
            config.generation.rows, config.generation.workers
        ),
    }
    info!(
        "Output: {} ({}, {})",
        config.output.path, config.output.layout, config.output.compression
    );
}

fn generate(config: &RuntimeConfig) -> Result<ColumnarTable> {
    let rows = config.generation.rows;
    let workers = config.generation.workers;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(workers.max(MIN_BLOCKING_THREADS))
        .build()
        .context("Failed to build tokio runtime")?;

    let started = Instant::now();
    let table = runtime
        .block_on(
            WorkerPool::with_fake_fields(config.generation.max_unique_attempts)
                .generate(rows, workers),
        )
        .context("Failed to generate dataset")?;
    let elapsed = started.elapsed();

    println!("{}", report::preview(&table, report::DEFAULT_PREVIEW_ROWS)?);
    println!(
        "Time taken to generate {} people into a table using {} workers:",
        rows, workers
    );
    println!("{}", report::timing_line(elapsed));

    Ok(table)
}

fn read_input(input: &Path) -> Result<ColumnarTable> {
    let started = Instant::now();
    let table = read_dataset(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let elapsed = started.elapsed();

    println!("{}", report::preview(&table, report::DEFAULT_PREVIEW_ROWS)?);
    println!("Time taken to read from Parquet:");
    println!("{}", report::timing_line(elapsed));

    Ok(table)
}

fn write_output(table: &ColumnarTable, config: &RuntimeConfig) -> Result<()> {
    let writer = TableWriter::new(writer_options(config))?;
    let path = Path::new(&config.output.path);

    let started = Instant::now();
    match config.output.layout {
        OutputLayout::Single => {
            println!("Output file for single-parquet file data: {}", path.display());
            writer.write(table, path)?;
        }
        OutputLayout::Partitioned => {
            println!(
                "Output directory for multi-parquet file data: {}",
                path.display()
            );
            let chunk_rows = (table.len() / config.generation.workers).max(1);
            writer.write_partitioned(table, path, DATASET_ID, chunk_rows)?;
        }
    }
    let elapsed = started.elapsed();

    println!("Time taken to write to Parquet:");
    println!("{}", report::timing_line(elapsed));
    Ok(())
}

fn writer_options(config: &RuntimeConfig) -> WriterOptions {
    let codec = match config.output.compression {
        Compression::Snappy => Codec::Snappy,
        Compression::Zstd => Codec::Zstd {
            level: config.output.zstd_level,
        },
        Compression::Uncompressed => Codec::Uncompressed,
    };

    WriterOptions {
        codec,
        row_group_size: config.output.row_group_size,
    }
}
