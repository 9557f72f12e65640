// Database layer: SQLite storage for presentation-layer overrides and
// load state.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever BLOGFRESH_DB_PATH points
// (defaults to the platform data directory).

pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;
pub mod traits;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub use sqlite::SqliteOverrideStore;
pub use traits::OverrideStore;

/// Open (or create) the database and run migrations.
///
/// This is the main entry point, called by `blogfresh init` and by any
/// command that needs the override store.
pub fn initialize(db_path: &str) -> Result<Connection> {
    // Create parent directories if needed
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    // Enable WAL mode for better concurrent read performance
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // Run schema creation / migrations
    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open the override store, creating it on first use.
pub fn open_store(db_path: &str) -> Result<SqliteOverrideStore> {
    let conn = initialize(db_path)?;
    Ok(SqliteOverrideStore::new(conn))
}
