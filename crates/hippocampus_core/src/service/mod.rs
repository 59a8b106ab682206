//! Journal use-case services.
//!
//! # Responsibility
//! - Orchestrate provider calls into use-case level APIs.
//! - Keep presentation layers decoupled from resource paths and SQL.

pub mod journal_service;
