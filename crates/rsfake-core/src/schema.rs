// Arrow schema for generated person records
//
// Column order is fixed and matches the field order of `ColumnarTable`.
// Every field carries a stable PARQUET:field_id so downstream readers can
// match columns by id rather than position.

use arrow::datatypes::{DataType, Field, Schema};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Column names as written to Parquet
pub mod field {
    pub const ID: &str = "id";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const EMAIL: &str = "email";
    pub const COMPANY: &str = "company";
    pub const PHONE_NUMBER: &str = "phone_number";
}

pub const SCHEMA_VERSION: &str = "1.0.0";

fn field_with_id(name: &str, data_type: DataType, nullable: bool, id: i32) -> Field {
    let metadata = HashMap::from([("PARQUET:field_id".to_string(), id.to_string())]);
    Field::new(name, data_type, nullable).with_metadata(metadata)
}

/// Returns the Arrow schema for person records
pub fn people_schema() -> Schema {
    people_schema_arc().as_ref().clone()
}

/// Returns a cached `Arc<Schema>` for person records.
pub fn people_schema_arc() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| Arc::new(build_schema())))
}

fn build_schema() -> Schema {
    let fields = vec![
        field_with_id(field::ID, DataType::UInt64, false, 1),
        field_with_id(field::FIRST_NAME, DataType::Utf8, false, 2),
        field_with_id(field::LAST_NAME, DataType::Utf8, false, 3),
        field_with_id(field::EMAIL, DataType::Utf8, false, 4),
        field_with_id(field::COMPANY, DataType::Utf8, false, 5),
        field_with_id(field::PHONE_NUMBER, DataType::Utf8, false, 6),
    ];

    let metadata = HashMap::from([(
        "rsfake.schema_version".to_string(),
        SCHEMA_VERSION.to_string(),
    )]);

    Schema::new_with_metadata(fields, metadata)
}
