//! Core data layer for the Hippocampus journal.
//! This crate is the single source of truth for entry invariants.

pub mod calendar;
pub mod config;
pub mod context;
pub mod contract;
pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod service;

pub use calendar::WeekStrip;
pub use config::{ConfigError, StoreConfig};
pub use context::StoreContext;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::date_ref::{display_label, format_date_ref, parse_date_ref, DateRefError};
pub use model::day::DayRecord;
pub use model::entry::{Entry, EntryId, EntryPatch, EntryValidationError, NewEntry};
pub use provider::{
    ChangeNotifier, ContentValues, EntryProvider, ProviderError, ProviderResult, Resource,
    ResourceChange, RowSet,
};
pub use repo::day_repo::{DayRepository, SqliteDayRepository};
pub use repo::{RepoError, RepoResult};
pub use service::journal_service::{JournalError, JournalResult, JournalService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
