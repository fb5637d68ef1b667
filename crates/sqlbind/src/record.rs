//! Decoded result rows: ordered field/value records with O(1) name lookup.
//!
//! A [`Record`] stores string-typed values in first-seen column order. A
//! column whose driver value was NULL is absent from the record entirely;
//! `get_by_name` returns an empty string either way, so use
//! [`Record::contains`] to tell "NULL" apart from "empty string".

use crate::client::DriverRow;
use crate::error::{SqlError, SqlResult};
use std::collections::HashMap;

/// One decoded row.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<String>,
    values: Vec<String>,
    name_index: HashMap<String, usize>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields (equals the number of values).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ordered field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Ordered values, parallel to [`Record::fields`].
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at an index; out-of-range reads as empty string.
    pub fn get(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    /// Value by field name; absent names read as empty string.
    pub fn get_by_name(&self, name: &str) -> &str {
        match self.name_index.get(name) {
            Some(&i) => self.get(i),
            None => "",
        }
    }

    /// Whether a field exists (distinguishes NULL from empty string).
    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Overwrite the value at an index. Returns false when out of range.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Set a value by field name: overwrites in place when the name exists,
    /// otherwise appends and records the new index.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) {
        match self.name_index.get(name) {
            Some(&i) => {
                self.values[i] = value.into();
            }
            None => {
                self.name_index.insert(name.to_string(), self.values.len());
                self.fields.push(name.to_string());
                self.values.push(value.into());
            }
        }
    }
}

/// Decode one driver row into a [`Record`].
///
/// NULL columns are skipped (no entry added); every other value converts via
/// [`crate::Value::to_text`]. An inconvertible kind aborts the row with a
/// [`SqlError::Decode`].
pub fn decode_row(row: &DriverRow) -> SqlResult<Record> {
    let mut record = Record::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = row.get(i);
        if value.is_null() {
            continue;
        }
        let text = value
            .to_text()
            .map_err(|e| SqlError::decode(column, e.to_string()))?;
        record.set_by_name(column, text);
    }
    Ok(record)
}

/// Decode a batch of driver rows, preserving row order.
pub fn decode_rows(rows: &[DriverRow]) -> SqlResult<Vec<Record>> {
    rows.iter().map(decode_row).collect()
}
