// Columnar storage for generated person records
//
// Six parallel vectors indexed in lock-step: index i across all of them is
// one logical record. The vectors are private so every mutation goes through
// `push`/`append`, which keep the lengths equal.

use arrow::array::{Array, ArrayRef, RecordBatch, StringArray, UInt64Array};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::schema::{field, people_schema_arc};

/// One logical row of a [`ColumnarTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub phone_number: String,
}

/// Person records stored column by column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnarTable {
    ids: Vec<u64>,
    first_names: Vec<String>,
    last_names: Vec<String>,
    emails: Vec<String>,
    companies: Vec<String>,
    phone_numbers: Vec<String>,
}

impl ColumnarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            first_names: Vec::with_capacity(capacity),
            last_names: Vec::with_capacity(capacity),
            emails: Vec::with_capacity(capacity),
            companies: Vec::with_capacity(capacity),
            phone_numbers: Vec::with_capacity(capacity),
        }
    }

    /// Number of records (the shared length of every column)
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.ids.push(record.id);
        self.first_names.push(record.first_name);
        self.last_names.push(record.last_name);
        self.emails.push(record.email);
        self.companies.push(record.company);
        self.phone_numbers.push(record.phone_number);
    }

    /// Move every record of `other` to the end of this table, keeping its order.
    pub fn append(&mut self, mut other: ColumnarTable) {
        self.ids.append(&mut other.ids);
        self.first_names.append(&mut other.first_names);
        self.last_names.append(&mut other.last_names);
        self.emails.append(&mut other.emails);
        self.companies.append(&mut other.companies);
        self.phone_numbers.append(&mut other.phone_numbers);
    }

    /// Concatenate tables in iteration order.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = ColumnarTable>,
    {
        let mut merged = ColumnarTable::new();
        for table in tables {
            merged.append(table);
        }
        merged
    }

    /// Copy out the record at `index`, or `None` past the end.
    pub fn record(&self, index: usize) -> Option<Record> {
        if index >= self.len() {
            return None;
        }

        Some(Record {
            id: self.ids[index],
            first_name: self.first_names[index].clone(),
            last_name: self.last_names[index].clone(),
            email: self.emails[index].clone(),
            company: self.companies[index].clone(),
            phone_number: self.phone_numbers[index].clone(),
        })
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn first_names(&self) -> &[String] {
        &self.first_names
    }

    pub fn last_names(&self) -> &[String] {
        &self.last_names
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn phone_numbers(&self) -> &[String] {
        &self.phone_numbers
    }

    /// Build an Arrow `RecordBatch` using the people schema.
    ///
    /// Text columns use i32 offsets, so very large tables should be converted
    /// in slices with [`ColumnarTable::to_record_batch_range`].
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        self.to_record_batch_range(0, self.len())
    }

    /// Build a `RecordBatch` from rows `offset..offset + len`.
    pub fn to_record_batch_range(&self, offset: usize, len: usize) -> Result<RecordBatch> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= self.len())
            .ok_or_else(|| {
                Error::invalid_configuration(format!(
                    "rows {}..{} out of range for table of {} rows",
                    offset,
                    offset.saturating_add(len),
                    self.len()
                ))
            })?;
        let range = offset..end;

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt64Array::from_iter_values(
                self.ids[range.clone()].iter().copied(),
            )),
            Arc::new(StringArray::from_iter_values(&self.first_names[range.clone()])),
            Arc::new(StringArray::from_iter_values(&self.last_names[range.clone()])),
            Arc::new(StringArray::from_iter_values(&self.emails[range.clone()])),
            Arc::new(StringArray::from_iter_values(&self.companies[range.clone()])),
            Arc::new(StringArray::from_iter_values(&self.phone_numbers[range])),
        ];

        Ok(RecordBatch::try_new(people_schema_arc(), columns)?)
    }

    /// Rebuild a table from a `RecordBatch`. Columns are looked up by name.
    pub fn try_from_record_batch(batch: &RecordBatch) -> Result<Self> {
        Ok(Self {
            ids: id_column(batch)?,
            first_names: string_column(batch, field::FIRST_NAME)?,
            last_names: string_column(batch, field::LAST_NAME)?,
            emails: string_column(batch, field::EMAIL)?,
            companies: string_column(batch, field::COMPANY)?,
            phone_numbers: string_column(batch, field::PHONE_NUMBER)?,
        })
    }
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| Error::schema_mismatch(format!("missing column '{}'", name)))?;

    if column.null_count() > 0 {
        return Err(Error::schema_mismatch(format!(
            "column '{}' contains {} nulls",
            name,
            column.null_count()
        )));
    }

    Ok(column)
}

fn id_column(batch: &RecordBatch) -> Result<Vec<u64>> {
    let array = column(batch, field::ID)?
        .as_any()
        .downcast_ref::<UInt64Array>()
        .ok_or_else(|| Error::schema_mismatch(format!("column '{}' is not UInt64", field::ID)))?;

    Ok(array.values().to_vec())
}

fn string_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    let array = column(batch, name)?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::schema_mismatch(format!("column '{}' is not Utf8", name)))?;

    Ok((0..array.len())
        .map(|idx| array.value(idx).to_string())
        .collect())
}
