// Reading Parquet output back into columnar tables
//
// Single files are read batch by batch; partitioned datasets are walked
// recursively and their parts concatenated in path order.

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rsfake_core::ColumnarTable;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{Result, WriterError};
use crate::write::is_parquet;

/// Read one Parquet file written by [`crate::TableWriter::write`].
pub fn read_table(path: impl AsRef<Path>) -> Result<ColumnarTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| WriterError::read_failure(path, e))?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .and_then(|builder| builder.build())
        .map_err(|e| WriterError::read_failure(path, e))?;

    let mut table = ColumnarTable::new();
    for batch in reader {
        let batch = batch.map_err(|e| WriterError::read_failure(path, e))?;
        let part = ColumnarTable::try_from_record_batch(&batch)
            .map_err(|e| WriterError::read_failure(path, e))?;
        table.append(part);
    }

    tracing::debug!("Read {} rows from '{}'", table.len(), path.display());
    Ok(table)
}

/// Read every `*.parquet` file below `base_dir` and concatenate them.
pub fn read_partitioned(base_dir: impl AsRef<Path>) -> Result<ColumnarTable> {
    let base_dir = base_dir.as_ref();

    let mut files = Vec::new();
    collect_parquet_files(base_dir, &mut files)?;
    if files.is_empty() {
        return Err(WriterError::read_failure(
            base_dir,
            "no parquet files found",
        ));
    }
    files.sort();

    let tables = files
        .iter()
        .map(read_table)
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "Read {} parts from '{}'",
        tables.len(),
        base_dir.display()
    );
    Ok(ColumnarTable::concat(tables))
}

/// Read `path` as a partitioned dataset if it is a directory, otherwise as a
/// single file.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<ColumnarTable> {
    let path = path.as_ref();
    if path.is_dir() {
        read_partitioned(path)
    } else if path.is_file() {
        read_table(path)
    } else {
        Err(WriterError::read_failure(
            path,
            "path is neither a file nor a directory",
        ))
    }
}

fn collect_parquet_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| WriterError::read_failure(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| WriterError::read_failure(dir, e))?.path();
        if path.is_dir() {
            collect_parquet_files(&path, files)?;
        } else if path.is_file() && is_parquet(&path) {
            files.push(path);
        }
    }
    Ok(())
}
