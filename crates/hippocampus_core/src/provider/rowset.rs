//! Materialized query results.

use crate::contract::entries;
use crate::model::entry::Entry;
use crate::provider::{ProviderError, ProviderResult};
use chrono::NaiveDate;
use rusqlite::types::Value;

/// Column names plus the rows a query returned, in result order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Text cell; `None` for null, non-text, or missing cells.
    pub fn text(&self, row: usize, column: &str) -> Option<&str> {
        match self.value(row, column)? {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Integer cell; `None` for null, non-integer, or missing cells.
    pub fn integer(&self, row: usize, column: &str) -> Option<i64> {
        match self.value(row, column)? {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Decodes every row into an [`Entry`].
    ///
    /// Requires the full entry projection; stored rows that violate entry
    /// invariants are reported as `InvalidData` instead of being masked.
    pub fn to_entries(&self) -> ProviderResult<Vec<Entry>> {
        for column in entries::ALL_COLUMNS {
            if self.column_index(column).is_none() {
                return Err(ProviderError::InvalidData(format!(
                    "result set lacks column `{column}` required to decode entries"
                )));
            }
        }

        (0..self.rows.len()).map(|row| self.decode_entry(row)).collect()
    }

    fn decode_entry(&self, row: usize) -> ProviderResult<Entry> {
        let id = self
            .integer(row, entries::COLUMN_ID)
            .ok_or_else(|| invalid(row, entries::COLUMN_ID, "an integer"))?;
        let title = self
            .text(row, entries::COLUMN_TITLE)
            .ok_or_else(|| invalid(row, entries::COLUMN_TITLE, "text"))?
            .to_string();
        let date_text = self
            .text(row, entries::COLUMN_DATE_REF)
            .ok_or_else(|| invalid(row, entries::COLUMN_DATE_REF, "text"))?;
        let date_ref = decode_stored_date(date_text)
            .ok_or_else(|| invalid(row, entries::COLUMN_DATE_REF, "an ISO date"))?;
        let pinned = match self.integer(row, entries::COLUMN_PIN) {
            Some(0) => false,
            Some(1) => true,
            _ => return Err(invalid(row, entries::COLUMN_PIN, "0 or 1")),
        };

        Ok(Entry {
            id,
            title,
            body: self.text(row, entries::COLUMN_BODY).map(str::to_string),
            tag: self.text(row, entries::COLUMN_TAG).map(str::to_string),
            date_ref,
            pinned,
        })
    }
}

fn decode_stored_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn invalid(row: usize, column: &str, expected: &str) -> ProviderError {
    ProviderError::InvalidData(format!(
        "row {row}: column `{column}` is not {expected}"
    ))
}
