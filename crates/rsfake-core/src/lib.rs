// rsfake-core - Pure record generation logic
//
// Everything needed to turn a row request into columnar person records:
// partition planning, per-worker generation contexts, and the columnar table
// with its Arrow schema. No I/O, no async, no runtime dependencies.

pub mod error;
pub mod field;
pub mod generate;
pub mod partition;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use error::{Error, Result};
pub use field::{FakeFieldGenerator, FieldGenerator, FieldKind, ID_MAX, ID_MIN};
pub use generate::PartitionGenerator;
pub use partition::{plan, Partition, PartitionPlan};
pub use schema::{people_schema, people_schema_arc};
pub use table::{ColumnarTable, Record};
