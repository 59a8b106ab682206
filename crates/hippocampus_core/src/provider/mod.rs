//! Resource-addressed CRUD over journal entries.
//!
//! # Responsibility
//! - Route query/insert/update/delete calls by resource path.
//! - Validate writes and normalize dates before they reach SQLite.
//! - Signal observers after successful mutations.
//!
//! # Invariants
//! - Item paths always scope the statement to one `_id`.
//! - Failed or no-op writes never emit change signals.

use crate::db::DbError;
use crate::model::entry::EntryValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod entry_provider;
pub mod notify;
pub mod resource;
pub mod rowset;
pub mod values;

pub use entry_provider::EntryProvider;
pub use notify::{ChangeNotifier, ResourceChange};
pub use resource::Resource;
pub use rowset::RowSet;
pub use values::ContentValues;

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Debug)]
pub enum ProviderError {
    /// Write rejected before touching storage.
    Validation(EntryValidationError),
    /// Path matches no pattern valid for the operation.
    UnsupportedResource {
        operation: &'static str,
        uri: String,
    },
    /// Path matches no pattern at all (type lookup).
    UnknownResource(String),
    /// SQLite rejected the statement.
    Storage(DbError),
    /// Stored row or result shape violates entry invariants.
    InvalidData(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnsupportedResource { operation, uri } => {
                write!(f, "{operation} is not supported for uri `{uri}`")
            }
            Self::UnknownResource(uri) => write!(f, "unknown uri `{uri}`"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid entry data: {message}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::UnsupportedResource { .. } | Self::UnknownResource(_) | Self::InvalidData(_) => {
                None
            }
        }
    }
}

impl From<EntryValidationError> for ProviderError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ProviderError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for ProviderError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}
