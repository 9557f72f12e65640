// Database queries: CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{ArticleOverride, OverridePatch};
use crate::articles::models::{ContentType, Freshness};

// --- Load state ---

/// Get a load state value by key (e.g., "last_loaded_at").
pub fn get_load_state(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM load_state WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a load state value (upsert).
pub fn set_load_state(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO load_state (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

// --- Article overrides ---

/// Raw columns as stored; enum columns are parsed after the row closure so
/// a bad value surfaces as an error instead of being silently dropped.
type OverrideRow = (i64, Option<String>, Option<String>, Option<String>, String);

const OVERRIDE_COLUMNS: &str = "article_id, freshness, content_type, note, updated_at";

fn override_from_row(raw: OverrideRow) -> Result<ArticleOverride> {
    let (article_id, freshness, content_type, note, updated_at) = raw;
    Ok(ArticleOverride {
        article_id: usize::try_from(article_id)
            .with_context(|| format!("Invalid article id {article_id} in overrides"))?,
        freshness: freshness.as_deref().map(str::parse::<Freshness>).transpose()?,
        content_type: content_type.as_deref().map(str::parse::<ContentType>).transpose()?,
        note,
        updated_at,
    })
}

/// Load the override for one article, if any.
pub fn get_override(conn: &Connection, article_id: usize) -> Result<Option<ArticleOverride>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {OVERRIDE_COLUMNS} FROM article_overrides WHERE article_id = ?1"
    ))?;
    let raw: Option<OverrideRow> = stmt
        .query_row(params![article_id as i64], |row| -> rusqlite::Result<OverrideRow> {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })
        .optional()?;
    raw.map(override_from_row).transpose()
}

/// All stored overrides, ordered by article id.
pub fn list_overrides(conn: &Connection) -> Result<Vec<ArticleOverride>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {OVERRIDE_COLUMNS} FROM article_overrides ORDER BY article_id"
    ))?;
    let rows = stmt.query_map([], |row| -> rusqlite::Result<OverrideRow> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
    })?;

    let mut overrides = Vec::new();
    for row in rows {
        overrides.push(override_from_row(row?)?);
    }
    Ok(overrides)
}

/// Read the stored override, merge the patch onto it and write it back.
///
/// Callers must run this inside a transaction so the read and the write see
/// the same state. A merge that leaves nothing set deletes the row and
/// returns `None`.
pub fn apply_patch(
    conn: &Connection,
    article_id: usize,
    patch: &OverridePatch,
) -> Result<Option<ArticleOverride>> {
    let current = get_override(conn, article_id)?;
    let (freshness, content_type, note) = patch.merge_onto(current.as_ref());

    if freshness.is_none() && content_type.is_none() && note.is_none() {
        delete_override(conn, article_id)?;
        return Ok(None);
    }

    conn.execute(
        "INSERT INTO article_overrides (article_id, freshness, content_type, note, updated_at)
         VALUES (?1, ?2, ?3, ?4, datetime('now'))
         ON CONFLICT(article_id) DO UPDATE SET
            freshness = ?2,
            content_type = ?3,
            note = ?4,
            updated_at = datetime('now')",
        params![
            article_id as i64,
            freshness.map(|f| f.as_str()),
            content_type.map(|c| c.as_str()),
            note,
        ],
    )?;

    get_override(conn, article_id)
}

/// Remove an article's override. Returns true if one existed.
pub fn delete_override(conn: &Connection, article_id: usize) -> Result<bool> {
    let removed = conn.execute(
        "DELETE FROM article_overrides WHERE article_id = ?1",
        params![article_id as i64],
    )?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_load_state_upsert() {
        let conn = test_conn();
        assert_eq!(get_load_state(&conn, "last_loaded_at").unwrap(), None);
        set_load_state(&conn, "last_loaded_at", "2025-01-01T00:00:00Z").unwrap();
        set_load_state(&conn, "last_loaded_at", "2025-02-01T00:00:00Z").unwrap();
        assert_eq!(
            get_load_state(&conn, "last_loaded_at").unwrap().as_deref(),
            Some("2025-02-01T00:00:00Z")
        );
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let conn = test_conn();
        apply_patch(
            &conn,
            7,
            &OverridePatch {
                freshness: Some(Freshness::Stale),
                ..Default::default()
            },
        )
        .unwrap();
        let merged = apply_patch(
            &conn,
            7,
            &OverridePatch {
                content_type: Some(ContentType::Evergreen),
                note: Some("checked by editor".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(merged.article_id, 7);
        assert_eq!(merged.freshness, Some(Freshness::Stale));
        assert_eq!(merged.content_type, Some(ContentType::Evergreen));
        assert_eq!(merged.note.as_deref(), Some("checked by editor"));
    }

    #[test]
    fn test_clearing_last_field_deletes_row() {
        let conn = test_conn();
        apply_patch(
            &conn,
            3,
            &OverridePatch {
                note: Some("tmp".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let result = apply_patch(
            &conn,
            3,
            &OverridePatch {
                note: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(result.is_none());
        assert!(list_overrides(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_bad_stored_tier_is_an_error() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO article_overrides (article_id, freshness) VALUES (1, 'mouldy')",
            [],
        )
        .unwrap();
        assert!(get_override(&conn, 1).is_err());
    }
}
