// SqliteOverrideStore: rusqlite backend implementing the OverrideStore trait.
//
// The Connection is wrapped in a std Mutex because Connection is !Sync.
// Every trait method takes the lock for the whole operation, and
// apply_patch additionally runs inside a transaction, so concurrent edits
// never interleave between the read and the write.

use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::Connection;

use super::models::{ArticleOverride, OverridePatch};
use super::traits::OverrideStore;

pub struct SqliteOverrideStore {
    conn: Mutex<Connection>,
}

impl SqliteOverrideStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// An in-memory store with the schema applied (tests, dry runs).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Override store lock poisoned"))
    }
}

impl OverrideStore for SqliteOverrideStore {
    fn table_count(&self) -> Result<i64> {
        let conn = self.lock()?;
        super::schema::table_count(&conn)
    }

    fn get_load_state(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        super::queries::get_load_state(&conn, key)
    }

    fn set_load_state(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        super::queries::set_load_state(&conn, key, value)
    }

    fn get_override(&self, article_id: usize) -> Result<Option<ArticleOverride>> {
        let conn = self.lock()?;
        super::queries::get_override(&conn, article_id)
    }

    fn apply_patch(
        &self,
        article_id: usize,
        patch: &OverridePatch,
    ) -> Result<Option<ArticleOverride>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let stored = super::queries::apply_patch(&tx, article_id, patch)?;
        tx.commit()?;
        Ok(stored)
    }

    fn clear_override(&self, article_id: usize) -> Result<bool> {
        let conn = self.lock()?;
        super::queries::delete_override(&conn, article_id)
    }

    fn list_overrides(&self) -> Result<Vec<ArticleOverride>> {
        let conn = self.lock()?;
        super::queries::list_overrides(&conn)
    }
}
