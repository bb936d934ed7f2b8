//! SQLite-backed user meta storage.

use crate::error::{AuthError, AuthResult};
use crate::meta::UserMetaStore;
use ema_types::UserId;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Persistent meta store backed by a single `user_meta` table.
pub struct SqliteMetaStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMetaStore {
    /// Opens (or creates) a meta store at the given path.
    pub fn open(path: &Path) -> AuthResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| AuthError::Storage(format!("failed to open meta store: {e}")))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        debug!("Opened meta store at {}", path.display());
        Ok(store)
    }

    /// Opens an in-memory meta store.
    pub fn open_in_memory() -> AuthResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AuthError::Storage(format!("failed to open in-memory meta store: {e}")))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AuthError::Storage("meta store lock poisoned".to_string()))
    }

    fn init_schema(&self) -> AuthResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS user_meta (
                user_id INTEGER NOT NULL,
                meta_key TEXT NOT NULL,
                meta_value TEXT NOT NULL,
                UNIQUE(user_id, meta_key)
            );
            ",
        )
        .map_err(|e| AuthError::Storage(format!("failed to init meta schema: {e}")))?;
        Ok(())
    }
}

fn sql_user_id(user: UserId) -> AuthResult<i64> {
    i64::try_from(user.get())
        .map_err(|_| AuthError::Storage(format!("user id {user} out of range")))
}

impl UserMetaStore for SqliteMetaStore {
    fn get(&self, user: UserId, key: &str) -> AuthResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT meta_value FROM user_meta WHERE user_id = ?1 AND meta_key = ?2",
                params![sql_user_id(user)?, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn add_if_absent(&self, user: UserId, entries: &[(&str, &str)]) -> AuthResult<()> {
        let user_id = sql_user_id(user)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO user_meta (user_id, meta_key, meta_value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id, meta_key) DO UPDATE SET meta_value = excluded.meta_value
                 WHERE user_meta.meta_value = ''",
                params![user_id, key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
