//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the persisted entry shape and its write-side inputs.
//! - Own the validation error vocabulary shared by provider and service.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused.
//! - `title` is never blank for a persisted entry.
//! - Every entry belongs to exactly one `date_ref`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned entry identifier.
pub type EntryId = i64;

/// One persisted journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub body: Option<String>,
    pub tag: Option<String>,
    /// Serialized as `YYYY-MM-DD`.
    pub date_ref: NaiveDate,
    pub pinned: bool,
}

/// Input for creating an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub body: Option<String>,
    pub tag: Option<String>,
    pub date_ref: NaiveDate,
    pub pinned: bool,
}

impl NewEntry {
    pub fn new(title: impl Into<String>, date_ref: NaiveDate) -> Self {
        Self {
            title: title.into(),
            body: None,
            tag: None,
            date_ref,
            pinned: false,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Rejects input that storage would refuse to persist.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.title.trim().is_empty() {
            return Err(EntryValidationError::BlankTitle);
        }
        Ok(())
    }
}

/// Partial update of one entry.
///
/// `None` leaves the column unchanged. For nullable columns, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub body: Option<Option<String>>,
    pub tag: Option<Option<String>>,
    pub date_ref: Option<NaiveDate>,
    pub pinned: Option<bool>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.tag.is_none()
            && self.date_ref.is_none()
            && self.pinned.is_none()
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        match self.title.as_deref() {
            Some(title) if title.trim().is_empty() => Err(EntryValidationError::BlankTitle),
            _ => Ok(()),
        }
    }
}

/// Write rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// `title` absent on insert, or explicitly null.
    MissingTitle,
    /// `title` present but empty after trimming.
    BlankTitle,
    /// `date_ref` absent on insert, or explicitly null.
    MissingDateRef,
    /// `date_ref` text that names no calendar day.
    InvalidDateRef(String),
    /// Caller tried to supply or change `_id`.
    ImmutableId,
    /// Column holds a value of the wrong storage class.
    InvalidValue {
        column: String,
        expected: &'static str,
    },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "entry requires a title"),
            Self::BlankTitle => write!(f, "entry title cannot be blank"),
            Self::MissingDateRef => write!(f, "entry requires a date"),
            Self::InvalidDateRef(value) => write!(f, "invalid entry date `{value}`"),
            Self::ImmutableId => write!(f, "entry id is assigned by storage and cannot be set"),
            Self::InvalidValue { column, expected } => {
                write!(f, "column `{column}` expects {expected}")
            }
        }
    }
}

impl Error for EntryValidationError {}
