//! SQLite-backed persistence.
//!
//! Provides:
//! - Key-value slots holding the serialized dashboard collections
//! - A log of completed timer runs, feeding the focus-minutes figure

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use super::kv::KvStore;
use crate::error::{DatabaseError, Result};
use crate::timer::TimerMode;

const DB_FILE: &str = "lifeboard.db";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub mode: TimerMode,
    pub duration_secs: u32,
    pub completed_at: DateTime<Utc>,
}

/// SQLite database for slots and the session log.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/lifeboard.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(DB_FILE);
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                mode          TEXT NOT NULL,
                duration_secs INTEGER NOT NULL,
                completed_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_mode ON sessions(mode);",
        )?;
        Ok(())
    }

    /// Record a timer run that counted down to zero.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        mode: TimerMode,
        duration_secs: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sessions (mode, duration_secs, completed_at) VALUES (?1, ?2, ?3)",
            params![mode.as_str(), duration_secs, completed_at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Whole minutes of completed focus runs, all time.
    pub fn focus_minutes(&self) -> Result<u64> {
        let secs: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(duration_secs), 0) FROM sessions WHERE mode = 'focus'",
            [],
            |row| row.get(0),
        )?;
        Ok(secs.max(0) as u64 / 60)
    }

    /// Most recent sessions first.
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, duration_secs, completed_at
             FROM sessions ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, mode, duration_secs, completed_at) = row?;
            let mode = if mode == "break" {
                TimerMode::Break
            } else {
                TimerMode::Focus
            };
            let completed_at = DateTime::parse_from_rfc3339(&completed_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            sessions.push(SessionRecord {
                id,
                mode,
                duration_secs,
                completed_at,
            });
        }
        Ok(sessions)
    }
}

impl KvStore for Database {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
