// Database schema: table creation and version bookkeeping.
//
// A `schema_version` table records the applied schema version so later
// changes can be migrated in place.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent and safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Editorial overrides keyed by the article id of the current load
        CREATE TABLE IF NOT EXISTS article_overrides (
            article_id INTEGER PRIMARY KEY,
            freshness TEXT,                    -- fresh / aging / stale / needs-update
            content_type TEXT,                 -- evergreen / semi-evergreen / time-sensitive / news
            note TEXT,                         -- free-text editor note
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Load state: last load time, source path
        CREATE TABLE IF NOT EXISTS load_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for listing the overrides that change the tier
        CREATE INDEX IF NOT EXISTS idx_overrides_freshness
            ON article_overrides(freshness);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // schema_version, article_overrides, load_state
        assert_eq!(table_count(&conn).unwrap(), 3i64);
    }

    #[test]
    fn test_overrides_table_has_note_column() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        conn.execute(
            "INSERT INTO article_overrides (article_id, freshness, note) VALUES (4, 'stale', 'rewrite intro')",
            [],
        )
        .unwrap();

        let note: String = conn
            .query_row(
                "SELECT note FROM article_overrides WHERE article_id = 4",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(note, "rewrite intro");
    }

    #[test]
    fn test_schema_version_recorded_once() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let versions: Vec<i64> = conn
            .prepare("SELECT version FROM schema_version ORDER BY version")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(versions, vec![1]);
    }
}
