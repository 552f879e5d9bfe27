// Generation of one record partition
//
// A PartitionGenerator owns its FieldGenerator for the whole partition. It
// either returns a table with exactly the requested number of rows or an
// error; a half-built table is never handed out.

use crate::error::Result;
use crate::field::{FakeFieldGenerator, FieldGenerator, FieldKind};
use crate::table::{ColumnarTable, Record};

/// Builds columnar partitions from a private generation context.
pub struct PartitionGenerator<G> {
    fields: G,
}

impl PartitionGenerator<FakeFieldGenerator> {
    /// Generator backed by a fresh entropy-seeded [`FakeFieldGenerator`].
    pub fn with_fake_fields() -> Self {
        Self::new(FakeFieldGenerator::new())
    }
}

impl<G: FieldGenerator> PartitionGenerator<G> {
    pub fn new(fields: G) -> Self {
        Self { fields }
    }

    /// Generate `size` records. `size == 0` yields an empty table.
    pub fn generate(&mut self, size: usize) -> Result<ColumnarTable> {
        let mut table = ColumnarTable::with_capacity(size);
        for row in 0..size {
            let record = self.next_record().inspect_err(|e| {
                tracing::debug!(row, size, "Partition generation stopped: {}", e);
            })?;
            table.push(record);
        }
        tracing::trace!(rows = size, "Generated partition");
        Ok(table)
    }

    fn next_record(&mut self) -> Result<Record> {
        Ok(Record {
            id: self.fields.id()?,
            first_name: self.fields.text(FieldKind::FirstName)?,
            last_name: self.fields.text(FieldKind::LastName)?,
            email: self.fields.text(FieldKind::Email)?,
            company: self.fields.text(FieldKind::Company)?,
            phone_number: self.fields.text(FieldKind::PhoneNumber)?,
        })
    }

    /// Hand back the generation context, e.g. to inspect its state.
    pub fn into_inner(self) -> G {
        self.fields
    }
}
