//! Column/value maps passed to insert and update.

use rusqlite::types::Value;
use std::collections::BTreeMap;

/// Column name to value map for one write.
///
/// Column names are not checked here; unknown names fail in storage.
/// A key mapped to [`Value::Null`] is distinct from an absent key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentValues {
    values: BTreeMap<String, Value>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, column: impl Into<String>, value: Value) -> &mut Self {
        self.values.insert(column.into(), value);
        self
    }

    pub fn put_text(&mut self, column: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.put(column, Value::Text(value.into()))
    }

    pub fn put_integer(&mut self, column: impl Into<String>, value: i64) -> &mut Self {
        self.put(column, Value::Integer(value))
    }

    /// Stored as integer 0/1.
    pub fn put_bool(&mut self, column: impl Into<String>, value: bool) -> &mut Self {
        self.put(column, Value::Integer(i64::from(value)))
    }

    pub fn put_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.put(column, Value::Null)
    }

    /// Puts text, or null for `None`.
    pub fn put_optional_text(
        &mut self,
        column: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> &mut Self {
        match value {
            Some(value) => self.put_text(column, value),
            None => self.put_null(column),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.remove(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(column, value)| (column.as_str(), value))
    }
}
