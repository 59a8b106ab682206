//! Explicit store lifecycle.
//!
//! # Responsibility
//! - Own the SQLite connection, authority and change notifier for one user
//!   of the store.
//! - Replace implicit process-wide handles with `open`/`close`.
//!
//! # Invariants
//! - A context is only constructed over a connection with the schema applied.
//! - Connections are not shared across threads; each thread opens its own
//!   context and SQLite arbitrates concurrent access to the same file.

use crate::config::StoreConfig;
use crate::contract::DEFAULT_AUTHORITY;
use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::model::entry::EntryId;
use crate::provider::{ChangeNotifier, Resource, ResourceChange};
use log::{error, info};
use rusqlite::Connection;
use std::sync::mpsc::Receiver;

pub struct StoreContext {
    conn: Connection,
    authority: String,
    notifier: ChangeNotifier,
}

impl StoreContext {
    /// Opens the database named by `config`, creating it when missing.
    pub fn open(config: &StoreConfig) -> DbResult<Self> {
        let conn = open_db(&config.db_path)?;
        Ok(Self::from_ready_connection(conn, config.authority.clone()))
    }

    /// Opens a private in-memory store using the default authority.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::from_ready_connection(conn, DEFAULT_AUTHORITY.to_string()))
    }

    /// Replaces the authority used to match and render resource paths.
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    fn from_ready_connection(conn: Connection, authority: String) -> Self {
        Self {
            conn,
            authority,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Shorthand for `notifier().subscribe()`.
    pub fn subscribe(&self) -> Receiver<ResourceChange> {
        self.notifier.subscribe()
    }

    pub fn entries_uri(&self) -> String {
        Resource::Collection.to_uri(&self.authority)
    }

    pub fn entry_uri(&self, id: EntryId) -> String {
        Resource::Item(id).to_uri(&self.authority)
    }

    /// Closes the connection, surfacing any error SQLite reports.
    pub fn close(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_, err)) => {
                error!("event=db_close module=db status=error error={}", err);
                Err(DbError::Sqlite(err))
            }
        }
    }
}
