//! Shared application state: the single storage handle.
//!
//! `CoreState` is built once at startup, wrapped in `Arc`, and handed to
//! the HTTP layer. Handlers borrow the connection through `lock_db()` for
//! the synchronous part of a request and release it before any `.await`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::db::{self, DatabaseError};

pub struct CoreState {
    db: Mutex<Connection>,
}

impl CoreState {
    /// Open (or create) the database file and run migrations.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let conn = db::open_database(path)?;
        tracing::info!(path = %path.display(), "Record store ready");
        Ok(Self::from_connection(conn))
    }

    /// In-memory store (for testing)
    pub fn in_memory() -> Result<Self, CoreError> {
        Ok(Self::from_connection(db::open_memory_database()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Borrow the connection. Every read-then-write rule runs under this
    /// guard, so two requests never interleave inside one.
    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, CoreError> {
        self.db.lock().map_err(|_| CoreError::LockPoisoned)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Store lock poisoned")]
    LockPoisoned,
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
