//! Parquet persistence for rsfake tables.
//!
//! Provides a [`TableWriter`] for single files and partitioned datasets, plus
//! readers that load either layout back into a `ColumnarTable`.

// Allow large error types - rich diagnostic messages are more valuable on error paths.
#![allow(clippy::result_large_err)]

mod encoding;
mod error;
mod read;
mod write;

pub use encoding::{Codec, WriterOptions, DEFAULT_ROW_GROUP_SIZE, DEFAULT_ZSTD_LEVEL};
pub use error::{ErrorCode, Result, WriterError};
pub use read::{read_dataset, read_partitioned, read_table};
pub use write::{TableWriter, WriteSummary};
