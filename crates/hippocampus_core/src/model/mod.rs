//! Journal domain model.
//!
//! # Responsibility
//! - Define the data structures used by the provider, repositories and
//!   services.
//! - Keep one canonical representation of calendar dates.
//!
//! # Invariants
//! - Dates cross the storage boundary only as `YYYY-MM-DD` text.

pub mod date_ref;
pub mod day;
pub mod entry;
