//! SQLite connection wrapper that migrates on open.

use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Owns the `rusqlite::Connection` used by the favorites manager.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and runs migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let db = Self {
            conn: Connection::open(path)?,
        };
        migrations::run_all(&db.conn)?;
        Ok(db)
    }

    /// In-memory database, discarded on drop. Used by tests.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        migrations::run_all(&db.conn)?;
        Ok(db)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
