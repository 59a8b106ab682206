//! SQLite-backed entry provider.

use crate::context::StoreContext;
use crate::contract::{entries, entry_item_type, entry_list_type};
use crate::db::{table_exists, table_has_column};
use crate::model::date_ref::{format_date_ref, parse_date_ref};
use crate::model::entry::{EntryId, EntryValidationError};
use crate::provider::notify::ResourceChange;
use crate::provider::resource::Resource;
use crate::provider::rowset::RowSet;
use crate::provider::values::ContentValues;
use crate::provider::{ProviderError, ProviderResult};
use log::{error, info};
use rusqlite::params_from_iter;
use rusqlite::types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteKind {
    Insert,
    Update,
}

/// CRUD façade over the `entries` table.
///
/// Projection, selection and sort order are SQL fragments passed through to
/// SQLite unchanged; `?` placeholders in a selection bind `selection_args`
/// as text.
pub struct EntryProvider<'ctx> {
    ctx: &'ctx StoreContext,
}

impl<'ctx> EntryProvider<'ctx> {
    /// Binds a provider to an opened store, checking the entry table shape.
    pub fn try_new(ctx: &'ctx StoreContext) -> ProviderResult<Self> {
        ensure_entry_table_ready(ctx)?;
        Ok(Self { ctx })
    }

    pub fn authority(&self) -> &str {
        self.ctx.authority()
    }

    pub fn collection_uri(&self) -> String {
        Resource::Collection.to_uri(self.authority())
    }

    pub fn item_uri(&self, id: EntryId) -> String {
        Resource::Item(id).to_uri(self.authority())
    }

    /// Returns the requested columns of every matching row.
    ///
    /// An empty or missing projection selects all columns. For item paths
    /// the caller's selection and arguments are ignored.
    pub fn query(
        &self,
        uri: &str,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: &[&str],
        sort_order: Option<&str>,
    ) -> ProviderResult<RowSet> {
        let resource = self.match_uri("query", uri)?;
        let (filter, args) = scoped_filter(resource, selection, selection_args);

        let columns = match projection {
            Some(columns) if !columns.is_empty() => columns.join(", "),
            _ => "*".to_string(),
        };
        let mut sql = format!("SELECT {columns} FROM {}", entries::TABLE_NAME);
        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter);
        }
        if let Some(order) = sort_order.map(str::trim).filter(|order| !order.is_empty()) {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        let conn = self.ctx.connection();
        let mut stmt = conn.prepare(&sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let column_count = column_names.len();

        let mut rows = stmt.query(params_from_iter(args))?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(column_count);
            for index in 0..column_count {
                cells.push(row.get::<_, Value>(index)?);
            }
            collected.push(cells);
        }

        info!(
            "event=entry_query module=provider status=ok resource={} rows={}",
            resource,
            collected.len()
        );
        Ok(RowSet::new(column_names, collected))
    }

    /// Persists one new entry and returns its item uri.
    ///
    /// # Errors
    /// - `UnsupportedResource` for anything but the collection path.
    /// - `Validation` when title or date are missing/invalid, or `_id` is set.
    /// - `Storage` when SQLite rejects the row; nothing is notified.
    pub fn insert(&self, uri: &str, values: &ContentValues) -> ProviderResult<String> {
        let resource = self.match_uri("insert", uri)?;
        if resource != Resource::Collection {
            return Err(ProviderError::UnsupportedResource {
                operation: "insert",
                uri: uri.to_string(),
            });
        }

        let values = normalize_values(values, WriteKind::Insert)?;
        let columns: Vec<String> = values
            .iter()
            .map(|(column, _)| quote_identifier(column))
            .collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            entries::TABLE_NAME,
            columns.join(", "),
            placeholders
        );

        let conn = self.ctx.connection();
        let bind_values = values.iter().map(|(_, value)| value);
        if let Err(err) = conn.execute(&sql, params_from_iter(bind_values)) {
            error!(
                "event=entry_insert module=provider status=error error_code=insert_failed error={}",
                err
            );
            return Err(err.into());
        }
        let id = conn.last_insert_rowid();

        self.notify(Resource::Collection);
        info!("event=entry_insert module=provider status=ok id={id}");
        Ok(self.item_uri(id))
    }

    /// Replaces the supplied columns on every matching row.
    ///
    /// Empty `values` return 0 without touching storage.
    pub fn update(
        &self,
        uri: &str,
        values: &ContentValues,
        selection: Option<&str>,
        selection_args: &[&str],
    ) -> ProviderResult<usize> {
        let resource = self.match_uri("update", uri)?;
        let values = normalize_values(values, WriteKind::Update)?;
        if values.is_empty() {
            return Ok(0);
        }

        let (filter, filter_args) = scoped_filter(resource, selection, selection_args);
        let assignments: Vec<String> = values
            .iter()
            .map(|(column, _)| format!("{} = ?", quote_identifier(column)))
            .collect();
        let mut sql = format!(
            "UPDATE {} SET {}",
            entries::TABLE_NAME,
            assignments.join(", ")
        );
        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter);
        }

        let mut bind_values: Vec<Value> = values.iter().map(|(_, value)| value.clone()).collect();
        bind_values.extend(filter_args);

        let changed = match self
            .ctx
            .connection()
            .execute(&sql, params_from_iter(bind_values))
        {
            Ok(changed) => changed,
            Err(err) => {
                error!(
                    "event=entry_update module=provider status=error resource={} error_code=update_failed error={}",
                    resource, err
                );
                return Err(err.into());
            }
        };

        if changed > 0 {
            self.notify(resource);
        }
        info!(
            "event=entry_update module=provider status=ok resource={} rows={}",
            resource, changed
        );
        Ok(changed)
    }

    /// Removes every matching row. A collection path without a selection
    /// removes all entries.
    pub fn delete(
        &self,
        uri: &str,
        selection: Option<&str>,
        selection_args: &[&str],
    ) -> ProviderResult<usize> {
        let resource = self.match_uri("delete", uri)?;
        let (filter, args) = scoped_filter(resource, selection, selection_args);

        let mut sql = format!("DELETE FROM {}", entries::TABLE_NAME);
        if let Some(filter) = filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter);
        }

        let deleted = match self
            .ctx
            .connection()
            .execute(&sql, params_from_iter(args))
        {
            Ok(deleted) => deleted,
            Err(err) => {
                error!(
                    "event=entry_delete module=provider status=error resource={} error_code=delete_failed error={}",
                    resource, err
                );
                return Err(err.into());
            }
        };

        if deleted > 0 {
            self.notify(resource);
        }
        info!(
            "event=entry_delete module=provider status=ok resource={} rows={}",
            resource, deleted
        );
        Ok(deleted)
    }

    /// MIME type of the resource named by `uri`.
    pub fn type_of(&self, uri: &str) -> ProviderResult<String> {
        match Resource::parse(uri, self.authority()) {
            Some(Resource::Collection) => Ok(entry_list_type(self.authority())),
            Some(Resource::Item(_)) => Ok(entry_item_type(self.authority())),
            None => Err(ProviderError::UnknownResource(uri.to_string())),
        }
    }

    fn match_uri(&self, operation: &'static str, uri: &str) -> ProviderResult<Resource> {
        Resource::parse(uri, self.authority()).ok_or_else(|| ProviderError::UnsupportedResource {
            operation,
            uri: uri.to_string(),
        })
    }

    fn notify(&self, resource: Resource) {
        self.ctx.notifier().notify_change(ResourceChange {
            resource,
            uri: resource.to_uri(self.authority()),
        });
    }
}

/// Resolves the effective WHERE clause and its bind values.
fn scoped_filter(
    resource: Resource,
    selection: Option<&str>,
    selection_args: &[&str],
) -> (Option<String>, Vec<Value>) {
    match resource {
        Resource::Item(id) => (
            Some(format!("{} = ?", entries::COLUMN_ID)),
            vec![Value::Integer(id)],
        ),
        Resource::Collection => {
            let filter = selection
                .map(str::trim)
                .filter(|selection| !selection.is_empty())
                .map(|selection| format!("({selection})"));
            let args = selection_args
                .iter()
                .map(|arg| Value::Text((*arg).to_string()))
                .collect();
            (filter, args)
        }
    }
}

/// Applies entry write rules and returns the values to bind.
///
/// `date_ref` text is rewritten to its canonical ISO form.
fn normalize_values(values: &ContentValues, kind: WriteKind) -> ProviderResult<ContentValues> {
    if values.contains_key(entries::COLUMN_ID) {
        return Err(EntryValidationError::ImmutableId.into());
    }

    match values.get(entries::COLUMN_TITLE) {
        None if kind == WriteKind::Insert => return Err(EntryValidationError::MissingTitle.into()),
        None => {}
        Some(Value::Null) => return Err(EntryValidationError::MissingTitle.into()),
        Some(Value::Text(title)) if title.trim().is_empty() => {
            return Err(EntryValidationError::BlankTitle.into())
        }
        Some(Value::Text(_)) => {}
        Some(_) => {
            return Err(EntryValidationError::InvalidValue {
                column: entries::COLUMN_TITLE.to_string(),
                expected: "text",
            }
            .into())
        }
    }

    let mut normalized = values.clone();
    match values.get(entries::COLUMN_DATE_REF) {
        None if kind == WriteKind::Insert => {
            return Err(EntryValidationError::MissingDateRef.into())
        }
        None => {}
        Some(Value::Null) => return Err(EntryValidationError::MissingDateRef.into()),
        Some(Value::Text(text)) => {
            let date = parse_date_ref(text)
                .map_err(|err| EntryValidationError::InvalidDateRef(err.input))?;
            normalized.put_text(entries::COLUMN_DATE_REF, format_date_ref(date));
        }
        Some(_) => {
            return Err(EntryValidationError::InvalidValue {
                column: entries::COLUMN_DATE_REF.to_string(),
                expected: "text",
            }
            .into())
        }
    }

    Ok(normalized)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn ensure_entry_table_ready(ctx: &StoreContext) -> ProviderResult<()> {
    let conn = ctx.connection();
    if !table_exists(conn, entries::TABLE_NAME)? {
        return Err(ProviderError::InvalidData(format!(
            "required table `{}` is missing",
            entries::TABLE_NAME
        )));
    }
    for column in entries::ALL_COLUMNS {
        if !table_has_column(conn, entries::TABLE_NAME, column)? {
            return Err(ProviderError::InvalidData(format!(
                "required column `{}.{column}` is missing",
                entries::TABLE_NAME
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_values, scoped_filter, WriteKind};
    use crate::model::entry::EntryValidationError;
    use crate::provider::{ContentValues, ProviderError, Resource};
    use rusqlite::types::Value;

    fn validation(result: Result<ContentValues, ProviderError>) -> EntryValidationError {
        match result {
            Err(ProviderError::Validation(err)) => err,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn item_filter_overrides_caller_selection() {
        let (filter, args) = scoped_filter(Resource::Item(9), Some("title = ?"), &["x"]);
        assert_eq!(filter.as_deref(), Some("_id = ?"));
        assert_eq!(args, vec![Value::Integer(9)]);
    }

    #[test]
    fn blank_collection_selection_means_no_filter() {
        let (filter, args) = scoped_filter(Resource::Collection, Some("  "), &[]);
        assert!(filter.is_none());
        assert!(args.is_empty());
    }

    #[test]
    fn insert_requires_title_and_date() {
        let mut values = ContentValues::new();
        values.put_text("date_ref", "2024-01-01");
        assert_eq!(
            validation(normalize_values(&values, WriteKind::Insert)),
            EntryValidationError::MissingTitle
        );

        let mut values = ContentValues::new();
        values.put_text("title", "Day 1");
        assert_eq!(
            validation(normalize_values(&values, WriteKind::Insert)),
            EntryValidationError::MissingDateRef
        );
    }

    #[test]
    fn update_allows_absent_title_but_not_null_title() {
        let mut values = ContentValues::new();
        values.put_text("body", "more");
        assert!(normalize_values(&values, WriteKind::Update).is_ok());

        values.put_null("title");
        assert_eq!(
            validation(normalize_values(&values, WriteKind::Update)),
            EntryValidationError::MissingTitle
        );
    }

    #[test]
    fn legacy_date_text_is_rewritten_to_iso() {
        let mut values = ContentValues::new();
        values.put_text("title", "t").put_text("date_ref", "Jan 05 2024");
        let normalized = normalize_values(&values, WriteKind::Insert).unwrap();
        assert_eq!(
            normalized.get("date_ref"),
            Some(&Value::Text("2024-01-05".to_string()))
        );
    }

    #[test]
    fn id_cannot_be_written() {
        let mut values = ContentValues::new();
        values.put_integer("_id", 3);
        assert_eq!(
            validation(normalize_values(&values, WriteKind::Update)),
            EntryValidationError::ImmutableId
        );
    }
}
