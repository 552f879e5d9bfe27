// Console output for the benchmark harness: table preview and phase timings

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use rsfake_core::ColumnarTable;
use std::time::Duration;

pub(crate) const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Render the first `rows` rows of `table` as an Arrow pretty-printed grid,
/// preceded by the table shape.
pub(crate) fn preview(table: &ColumnarTable, rows: usize) -> Result<String> {
    let rows = rows.min(table.len());
    let mut head = ColumnarTable::with_capacity(rows);
    for record in (0..rows).filter_map(|i| table.record(i)) {
        head.push(record);
    }

    let batch = head
        .to_record_batch()
        .context("Failed to build preview batch")?;
    let grid = pretty_format_batches(&[batch]).context("Failed to format preview")?;

    Ok(format!("shape: ({}, 6)\n{}", table.len(), grid))
}

/// `--- 1.234 seconds ---`
pub(crate) fn timing_line(elapsed: Duration) -> String {
    format!("--- {:.3} seconds ---", elapsed.as_secs_f64())
}
