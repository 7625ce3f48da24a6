use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::match_engine::Match;

/// Key the in-progress match is saved under.
pub const IN_PROGRESS_KEY: &str = "match_in_progress";

/// Whole-match snapshots taken between deliveries.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, key: &str, snapshot: &Match) -> Result<()>;
    fn load(&self, key: &str) -> Result<Option<Match>>;
    fn clear(&self, key: &str) -> Result<()>;
}

/// SQLite-backed key/value store holding JSON snapshots.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open snapshot db {}", path.display()))?;
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS snapshots (
                key      TEXT PRIMARY KEY,
                body     TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );",
        )
        .context("failed to create snapshots table")?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

impl SnapshotStore for SqliteStore {
    fn save(&self, key: &str, snapshot: &Match) -> Result<()> {
        let body = serde_json::to_string(snapshot).context("failed to serialize match")?;
        let saved_at = chrono::Utc::now().to_rfc3339();
        self.conn.lock().unwrap().execute(
            "INSERT INTO snapshots (key, body, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET body = excluded.body, saved_at = excluded.saved_at",
            params![key, body, saved_at],
        )?;
        tracing::debug!(key, "snapshot saved");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Match>> {
        let body: Option<String> = self
            .conn
            .lock()
            .unwrap()
            .query_row("SELECT body FROM snapshots WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        body.map(|b| serde_json::from_str(&b).with_context(|| format!("corrupt snapshot under {key}")))
            .transpose()
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.conn
            .lock()
            .unwrap()
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;
        Ok(())
    }
}
