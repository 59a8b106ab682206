//! Journal use-case service.
//!
//! # Responsibility
//! - Provide typed entry APIs for presentation callers.
//! - Express every call through the provider's resource-path contract so
//!   observers see the same change signals as raw provider callers.
//!
//! # Invariants
//! - Titles and bodies are trimmed; empty optional text is stored as null.
//! - Day listings put pinned entries first, then insertion order.
//! - Writes read back the stored row instead of echoing the input.

use crate::calendar::WeekStrip;
use crate::contract::entries;
use crate::context::StoreContext;
use crate::model::date_ref::format_date_ref;
use crate::model::entry::{Entry, EntryId, EntryPatch, EntryValidationError, NewEntry};
use crate::provider::{ContentValues, EntryProvider, ProviderError, Resource};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DAY_SORT_ORDER: &str = "pin DESC, _id ASC";
const RANGE_SORT_ORDER: &str = "date_ref ASC, pin DESC, _id ASC";

pub type JournalResult<T> = Result<T, JournalError>;

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalError {
    /// Input rejected before or by the provider.
    Validation(EntryValidationError),
    /// Target entry does not exist.
    NotFound(EntryId),
    /// Provider or storage failure.
    Provider(ProviderError),
    /// Write succeeded but the read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::Provider(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent journal state: {details}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for JournalError {
    fn from(value: ProviderError) -> Self {
        match value {
            ProviderError::Validation(err) => Self::Validation(err),
            other => Self::Provider(other),
        }
    }
}

impl From<EntryValidationError> for JournalError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Typed facade over [`EntryProvider`].
pub struct JournalService<'ctx> {
    provider: EntryProvider<'ctx>,
}

impl<'ctx> JournalService<'ctx> {
    pub fn try_new(ctx: &'ctx StoreContext) -> JournalResult<Self> {
        Ok(Self {
            provider: EntryProvider::try_new(ctx)?,
        })
    }

    pub fn provider(&self) -> &EntryProvider<'ctx> {
        &self.provider
    }

    /// Creates one entry and returns it as stored.
    pub fn create_entry(&self, entry: &NewEntry) -> JournalResult<Entry> {
        entry.validate()?;

        let mut values = ContentValues::new();
        values
            .put_text(entries::COLUMN_TITLE, entry.title.trim())
            .put_optional_text(entries::COLUMN_BODY, clean_optional(entry.body.as_deref()))
            .put_optional_text(entries::COLUMN_TAG, clean_optional(entry.tag.as_deref()))
            .put_text(entries::COLUMN_DATE_REF, format_date_ref(entry.date_ref))
            .put_bool(entries::COLUMN_PIN, entry.pinned);

        let uri = self.provider.insert(&self.provider.collection_uri(), &values)?;
        let id = Resource::parse(&uri, self.provider.authority())
            .and_then(|resource| resource.id())
            .ok_or(JournalError::InconsistentState(
                "insert returned a non-item uri",
            ))?;

        self.get_entry(id)?.ok_or(JournalError::InconsistentState(
            "created entry not found in read-back",
        ))
    }

    pub fn get_entry(&self, id: EntryId) -> JournalResult<Option<Entry>> {
        let rows = self.provider.query(
            &self.provider.item_uri(id),
            Some(&entries::ALL_COLUMNS[..]),
            None,
            &[],
            None,
        )?;
        Ok(rows.to_entries()?.into_iter().next())
    }

    /// Entries of one day, pinned first.
    pub fn entries_for_day(&self, date: NaiveDate) -> JournalResult<Vec<Entry>> {
        let date_text = format_date_ref(date);
        let rows = self.provider.query(
            &self.provider.collection_uri(),
            Some(&entries::ALL_COLUMNS[..]),
            Some("date_ref = ?"),
            &[date_text.as_str()],
            Some(DAY_SORT_ORDER),
        )?;
        Ok(rows.to_entries()?)
    }

    /// Entries with `from <= date_ref <= to`, grouped by day.
    pub fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> JournalResult<Vec<Entry>> {
        let from_text = format_date_ref(from);
        let to_text = format_date_ref(to);
        let rows = self.provider.query(
            &self.provider.collection_uri(),
            Some(&entries::ALL_COLUMNS[..]),
            Some("date_ref BETWEEN ? AND ?"),
            &[from_text.as_str(), to_text.as_str()],
            Some(RANGE_SORT_ORDER),
        )?;
        Ok(rows.to_entries()?)
    }

    /// Entry count for every day of `strip`, in strip order.
    pub fn day_counts(&self, strip: &WeekStrip) -> JournalResult<Vec<(NaiveDate, usize)>> {
        let from_text = format_date_ref(strip.first_day());
        let to_text = format_date_ref(strip.last_day());
        let rows = self.provider.query(
            &self.provider.collection_uri(),
            Some(&[entries::COLUMN_DATE_REF][..]),
            Some("date_ref BETWEEN ? AND ?"),
            &[from_text.as_str(), to_text.as_str()],
            None,
        )?;

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for row in 0..rows.len() {
            if let Some(date) = rows.text(row, entries::COLUMN_DATE_REF) {
                *counts.entry(date.to_string()).or_default() += 1;
            }
        }

        Ok(strip
            .days()
            .iter()
            .map(|day| {
                let count = counts.get(&format_date_ref(*day)).copied().unwrap_or(0);
                (*day, count)
            })
            .collect())
    }

    /// Applies `patch` and returns the stored entry.
    ///
    /// An empty patch performs no write and returns the current entry.
    pub fn update_entry(&self, id: EntryId, patch: &EntryPatch) -> JournalResult<Entry> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get_entry(id)?.ok_or(JournalError::NotFound(id));
        }

        let mut values = ContentValues::new();
        if let Some(title) = patch.title.as_deref() {
            values.put_text(entries::COLUMN_TITLE, title.trim());
        }
        if let Some(body) = patch.body.as_ref() {
            values.put_optional_text(entries::COLUMN_BODY, clean_optional(body.as_deref()));
        }
        if let Some(tag) = patch.tag.as_ref() {
            values.put_optional_text(entries::COLUMN_TAG, clean_optional(tag.as_deref()));
        }
        if let Some(date) = patch.date_ref {
            values.put_text(entries::COLUMN_DATE_REF, format_date_ref(date));
        }
        if let Some(pinned) = patch.pinned {
            values.put_bool(entries::COLUMN_PIN, pinned);
        }

        let changed = self
            .provider
            .update(&self.provider.item_uri(id), &values, None, &[])?;
        if changed == 0 {
            return Err(JournalError::NotFound(id));
        }

        self.get_entry(id)?.ok_or(JournalError::InconsistentState(
            "updated entry not found in read-back",
        ))
    }

    pub fn set_pinned(&self, id: EntryId, pinned: bool) -> JournalResult<Entry> {
        let patch = EntryPatch {
            pinned: Some(pinned),
            ..EntryPatch::default()
        };
        self.update_entry(id, &patch)
    }

    /// Returns whether the entry existed.
    pub fn delete_entry(&self, id: EntryId) -> JournalResult<bool> {
        let deleted = self.provider.delete(&self.provider.item_uri(id), None, &[])?;
        Ok(deleted > 0)
    }

    /// Removes every entry; returns how many were removed.
    pub fn delete_all_entries(&self) -> JournalResult<usize> {
        Ok(self
            .provider
            .delete(&self.provider.collection_uri(), None, &[])?)
    }
}

fn clean_optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
