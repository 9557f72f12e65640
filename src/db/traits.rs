// Override store trait: the seam between the presentation layer and
// wherever overrides are persisted.
//
// Implementors: SqliteOverrideStore (wraps rusqlite). Methods are
// synchronous; the pipeline never touches this store, so nothing here
// needs to be async.

use anyhow::Result;

use super::models::{ArticleOverride, OverridePatch};

pub trait OverrideStore: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    fn table_count(&self) -> Result<i64>;

    // --- Load state ---

    /// Get a load state value by key (e.g., "last_loaded_at").
    fn get_load_state(&self, key: &str) -> Result<Option<String>>;

    /// Set a load state value (upsert).
    fn set_load_state(&self, key: &str, value: &str) -> Result<()>;

    // --- Overrides ---

    /// Load one article's override, if any.
    fn get_override(&self, article_id: usize) -> Result<Option<ArticleOverride>>;

    /// Atomically read, merge and write an override. Returns the stored
    /// result, or `None` if the merge left nothing set.
    fn apply_patch(&self, article_id: usize, patch: &OverridePatch)
        -> Result<Option<ArticleOverride>>;

    /// Remove an article's override. Returns true if one existed.
    fn clear_override(&self, article_id: usize) -> Result<bool>;

    /// All stored overrides, ordered by article id.
    fn list_overrides(&self) -> Result<Vec<ArticleOverride>>;
}
