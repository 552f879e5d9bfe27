use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use rsfake_core::schema::SCHEMA_VERSION;

use crate::error::{Result, WriterError};

pub const DEFAULT_ROW_GROUP_SIZE: usize = 32 * 1024;
pub const DEFAULT_ZSTD_LEVEL: i32 = 2;

/// Column compression codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Codec {
    #[default]
    Snappy,
    Zstd { level: i32 },
    Uncompressed,
}

/// Tunables for [`crate::TableWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    pub codec: Codec,
    pub row_group_size: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            codec: Codec::default(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

fn compression_setting(codec: Codec) -> Result<Compression> {
    match codec {
        Codec::Snappy => Ok(Compression::SNAPPY),
        Codec::Uncompressed => Ok(Compression::UNCOMPRESSED),
        Codec::Zstd { level } => {
            let level = ZstdLevel::try_new(level).map_err(|e| {
                WriterError::invalid_config(format!("invalid zstd level {}: {}", level, e))
            })?;
            Ok(Compression::ZSTD(level))
        }
    }
}

/// Build writer properties for person tables
///
/// - Snappy compression unless configured otherwise
/// - Dictionary encoding enabled (names and companies repeat heavily)
/// - 32k rows per group by default (configurable)
/// - rsfake and schema versions embedded in file metadata
pub(crate) fn writer_properties(options: &WriterOptions) -> Result<WriterProperties> {
    if options.row_group_size == 0 {
        return Err(WriterError::invalid_config(
            "row_group_size must be greater than 0",
        ));
    }

    let metadata = vec![
        KeyValue {
            key: "rsfake.version".to_string(),
            value: Some(env!("CARGO_PKG_VERSION").to_string()),
        },
        KeyValue {
            key: "rsfake.schema_version".to_string(),
            value: Some(SCHEMA_VERSION.to_string()),
        },
    ];

    Ok(WriterProperties::builder()
        .set_dictionary_enabled(true)
        .set_statistics_enabled(EnabledStatistics::Page)
        .set_compression(compression_setting(options.codec)?)
        .set_data_page_size_limit(256 * 1024)
        .set_write_batch_size(32 * 1024)
        .set_max_row_group_size(options.row_group_size)
        .set_dictionary_page_size_limit(128 * 1024)
        .set_key_value_metadata(Some(metadata))
        .build())
}
