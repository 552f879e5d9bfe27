//! Core write operations for Parquet output.
//!
//! Writes a [`ColumnarTable`] either to one Parquet file or to a partitioned
//! dataset directory (`dataset=<id>/part-00000.parquet`, ...). Writes are not
//! atomic: a failure can leave a partial file behind.

use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use rsfake_core::{people_schema_arc, ColumnarTable};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::encoding::{writer_properties, WriterOptions};
use crate::error::{Result, WriterError};

/// Outcome of one file write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: u64,
}

/// Serializes person tables to Parquet.
#[derive(Debug, Clone)]
pub struct TableWriter {
    properties: WriterProperties,
    batch_rows: usize,
}

impl TableWriter {
    pub fn new(options: WriterOptions) -> Result<Self> {
        Ok(Self {
            properties: writer_properties(&options)?,
            batch_rows: options.row_group_size,
        })
    }

    /// Write `table` to a single Parquet file, creating or overwriting it.
    ///
    /// Rows are converted to Arrow one row group at a time, so the text
    /// columns of a single batch stay well below the i32 offset limit.
    pub fn write(&self, table: &ColumnarTable, path: impl AsRef<Path>) -> Result<WriteSummary> {
        let path = path.as_ref();
        let summary = self.write_rows(table, 0, table.len(), path)?;
        tracing::info!(
            "✓ Wrote {} rows to '{}' ({} bytes)",
            summary.rows,
            summary.path.display(),
            summary.bytes
        );
        Ok(summary)
    }

    /// Write `table` as `<base_dir>/dataset=<dataset_id>/part-NNNNN.parquet`
    /// files of at most `chunk_rows` rows each.
    ///
    /// Existing `.parquet` files in the dataset directory are removed first.
    /// An empty table produces a single empty part so readers still see the schema.
    pub fn write_partitioned(
        &self,
        table: &ColumnarTable,
        base_dir: impl AsRef<Path>,
        dataset_id: &str,
        chunk_rows: usize,
    ) -> Result<Vec<WriteSummary>> {
        let base_dir = base_dir.as_ref();

        if chunk_rows == 0 {
            return Err(WriterError::invalid_config(
                "chunk_rows must be greater than 0",
            ));
        }
        // `out/` does not stat as a file even when `out` is one
        let base_name = base_dir.to_string_lossy();
        let base_path = Path::new(base_name.trim_end_matches('/'));
        if base_dir.is_file() || base_path.is_file() {
            return Err(WriterError::invalid_config(format!(
                "'{}' already exists as a file; partitioned output needs a directory",
                base_path.display()
            )));
        }

        let dataset_dir = base_dir.join(format!("dataset={}", dataset_id));
        prepare_dataset_dir(&dataset_dir)?;

        let total_rows = table.len();
        let mut summaries = Vec::new();
        let mut offset = 0;
        loop {
            let len = chunk_rows.min(total_rows - offset);
            let part_path = dataset_dir.join(format!("part-{:05}.parquet", summaries.len()));
            tracing::debug!(
                "Writing part {} ({} rows at offset {})",
                part_path.display(),
                len,
                offset
            );

            summaries.push(self.write_rows(table, offset, len, &part_path)?);
            offset += len;
            if offset >= total_rows {
                break;
            }
        }

        tracing::info!(
            "✓ Wrote {} rows to '{}' in {} parts",
            total_rows,
            dataset_dir.display(),
            summaries.len()
        );
        Ok(summaries)
    }

    fn write_rows(
        &self,
        table: &ColumnarTable,
        offset: usize,
        len: usize,
        path: &Path,
    ) -> Result<WriteSummary> {
        let file = File::create(path).map_err(|e| WriterError::write_failure(path, e))?;

        let mut arrow_writer = ArrowWriter::try_new(
            BufWriter::new(file),
            people_schema_arc(),
            Some(self.properties.clone()),
        )
        .map_err(|e| WriterError::write_failure(path, e))?;

        let end = offset + len;
        let mut start = offset;
        while start < end {
            let rows = self.batch_rows.min(end - start);
            let batch = table
                .to_record_batch_range(start, rows)
                .map_err(|e| WriterError::write_failure(path, e))?;
            arrow_writer
                .write(&batch)
                .map_err(|e| WriterError::write_failure(path, e))?;
            start += rows;
        }

        let mut sink = arrow_writer
            .into_inner()
            .map_err(|e| WriterError::write_failure(path, e))?;
        sink.flush()
            .map_err(|e| WriterError::write_failure(path, e))?;

        let bytes = fs::metadata(path)
            .map_err(|e| WriterError::write_failure(path, e))?
            .len();

        Ok(WriteSummary {
            path: path.to_path_buf(),
            rows: len,
            bytes,
        })
    }
}

fn prepare_dataset_dir(dataset_dir: &Path) -> Result<()> {
    if !dataset_dir.exists() {
        return fs::create_dir_all(dataset_dir)
            .map_err(|e| WriterError::write_failure(dataset_dir, e));
    }

    let entries =
        fs::read_dir(dataset_dir).map_err(|e| WriterError::write_failure(dataset_dir, e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| WriterError::write_failure(dataset_dir, e))?
            .path();
        if path.is_file() && is_parquet(&path) {
            tracing::debug!("Removing stale part {}", path.display());
            fs::remove_file(&path).map_err(|e| WriterError::write_failure(&path, e))?;
        }
    }
    Ok(())
}

pub(crate) fn is_parquet(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("parquet")
}
