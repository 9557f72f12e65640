// JSON export: the document a dashboard reads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::articles::models::{ArticleCollection, ArticleRecord};
use crate::db::models::ArticleOverride;

#[derive(Serialize)]
pub struct ExportDocument<'a> {
    pub articles: &'a [ArticleRecord],
    pub categories: &'a [String],
    pub tags: &'a [String],
    pub overrides: &'a [ArticleOverride],
}

impl<'a> ExportDocument<'a> {
    pub fn new(collection: &'a ArticleCollection, overrides: &'a [ArticleOverride]) -> Self {
        Self {
            articles: &collection.articles,
            categories: &collection.categories,
            tags: &collection.tags,
            overrides,
        }
    }
}

/// Pretty-printed JSON for the collection and its overrides.
pub fn render_export(
    collection: &ArticleCollection,
    overrides: &[ArticleOverride],
) -> Result<String> {
    serde_json::to_string_pretty(&ExportDocument::new(collection, overrides))
        .context("Failed to serialize article export")
}

/// Write the JSON export to `path`.
pub fn write_export(
    collection: &ArticleCollection,
    overrides: &[ArticleOverride],
    path: &str,
) -> Result<PathBuf> {
    let json = render_export(collection, overrides)?;
    let path = Path::new(path);
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    Ok(path.to_path_buf())
}
