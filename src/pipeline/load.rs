// Article pipeline: CSV rows -> classified, scored, sorted collection.
//
// Each row is trimmed, filtered, dated, classified and scored in file order.
// Rows that fail a per-row check are dropped (and logged at debug level)
// without interrupting the batch. Only file-level problems, like an
// unreadable file or a missing required header, are returned as errors.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info};

use crate::articles::models::{ArticleCollection, ArticleRecord};
use crate::classify::{self, dates};
use crate::scoring::freshness;

pub const TITLE_COLUMN: &str = "Post title";
pub const URL_COLUMN: &str = "Post URL";
pub const DATE_COLUMN: &str = "Publish date";
pub const CATEGORIES_COLUMN: &str = "Categories";
pub const TAGS_COLUMN: &str = "Tags";

/// Length of one "month" of article age: 30.44 days in milliseconds.
pub const MS_PER_MONTH: i64 = 2_630_016_000;

/// Default URL marker for articles that belong to the blog section.
pub const DEFAULT_URL_MARKER: &str = "/blog/";

/// Knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// A row is kept only if its URL contains at least one of these.
    /// An empty list keeps every URL.
    pub url_markers: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            url_markers: vec![DEFAULT_URL_MARKER.to_string()],
        }
    }
}

/// One data row of the export, before any cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArticleRow {
    pub title: String,
    pub url: String,
    pub publish_date: String,
    /// `None` when the file has no Categories column
    pub categories: Option<String>,
    /// `None` when the file has no Tags column
    pub tags: Option<String>,
}

/// Why a row was left out of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DropReason {
    MissingTitle,
    MissingUrl,
    OutOfScopeUrl,
    UnparseableDate,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::MissingTitle => "missing title",
            DropReason::MissingUrl => "missing url",
            DropReason::OutOfScopeUrl => "url outside blog section",
            DropReason::UnparseableDate => "unparseable publish date",
        }
    }
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Load and classify an article export from disk.
pub fn load_csv(
    path: &Path,
    now: DateTime<Utc>,
    options: &PipelineOptions,
) -> Result<ArticleCollection> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open article export at {}", path.display()))?;
    load_from_reader(file, now, options)
        .with_context(|| format!("Failed to load article export {}", path.display()))
}

/// Load and classify an article export from any reader.
pub fn load_from_reader<R: Read>(
    reader: R,
    now: DateTime<Utc>,
    options: &PipelineOptions,
) -> Result<ArticleCollection> {
    let rows = read_rows(reader)?;
    Ok(build_collection(&rows, now, options))
}

/// Parse CSV text into raw rows, validating the header.
///
/// Short rows are tolerated; missing cells read as empty strings. Cells
/// that are not valid UTF-8 are decoded lossily, and the row then goes
/// through the usual per-row checks.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawArticleRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();
    if headers.is_empty() {
        anyhow::bail!("CSV file has no header row");
    }

    let position = |name: &str| headers.iter().position(|h| h == name);
    let required = |name: &str| {
        position(name)
            .ok_or_else(|| anyhow::anyhow!("CSV header is missing required column '{name}'"))
    };
    let title_idx = required(TITLE_COLUMN)?;
    let url_idx = required(URL_COLUMN)?;
    let date_idx = required(DATE_COLUMN)?;
    let categories_idx = position(CATEGORIES_COLUMN);
    let tags_idx = position(TAGS_COLUMN);

    // Byte records so one badly encoded cell (Latin-1 exports are common)
    // degrades to U+FFFD instead of failing the whole file.
    let mut rows = Vec::new();
    for (i, record) in csv_reader.byte_records().enumerate() {
        // +2: 1-based, and the header occupies line 1
        let record = record.with_context(|| format!("Malformed CSV record at line {}", i + 2))?;
        let cell = |idx: usize| {
            record
                .get(idx)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        };
        rows.push(RawArticleRow {
            title: cell(title_idx),
            url: cell(url_idx),
            publish_date: cell(date_idx),
            categories: categories_idx.map(cell),
            tags: tags_idx.map(cell),
        });
    }

    Ok(rows)
}

/// Run the full pipeline over already-parsed rows.
///
/// Ids are assigned in file order among surviving rows; the returned
/// articles are then sorted newest first.
pub fn build_collection(
    rows: &[RawArticleRow],
    now: DateTime<Utc>,
    options: &PipelineOptions,
) -> ArticleCollection {
    let mut articles: Vec<ArticleRecord> = Vec::with_capacity(rows.len());
    let mut dropped: BTreeMap<DropReason, usize> = BTreeMap::new();

    for (i, row) in rows.iter().enumerate() {
        match build_record(row, articles.len(), now, options) {
            Ok(record) => articles.push(record),
            Err(reason) => {
                debug!(row = i + 1, reason = reason.as_str(), "Dropping article row");
                *dropped.entry(reason).or_default() += 1;
            }
        }
    }

    articles.sort_by(|a, b| b.publish_timestamp.cmp(&a.publish_timestamp));

    let categories: BTreeSet<&str> = articles
        .iter()
        .flat_map(|a| a.categories.iter().map(String::as_str))
        .collect();
    let tags: BTreeSet<&str> = articles
        .iter()
        .flat_map(|a| a.tags.iter().map(String::as_str))
        .collect();
    let categories: Vec<String> = categories.into_iter().map(str::to_string).collect();
    let tags: Vec<String> = tags.into_iter().map(str::to_string).collect();

    info!(
        rows = rows.len(),
        kept = articles.len(),
        dropped = rows.len() - articles.len(),
        categories = categories.len(),
        tags = tags.len(),
        "Article export classified"
    );
    for (reason, count) in &dropped {
        debug!(reason = reason.as_str(), count, "Dropped rows by reason");
    }

    ArticleCollection {
        articles,
        categories,
        tags,
    }
}

/// Clean, filter, classify and score a single row.
pub fn build_record(
    row: &RawArticleRow,
    id: usize,
    now: DateTime<Utc>,
    options: &PipelineOptions,
) -> std::result::Result<ArticleRecord, DropReason> {
    let title = row.title.trim();
    if title.is_empty() {
        return Err(DropReason::MissingTitle);
    }
    let url = row.url.trim();
    if url.is_empty() {
        return Err(DropReason::MissingUrl);
    }
    if !is_in_scope(url, options) {
        return Err(DropReason::OutOfScopeUrl);
    }
    let published = dates::parse_date(&row.publish_date).ok_or(DropReason::UnparseableDate)?;

    let age_months = age_in_months(now, published);
    let classification = classify::classify(title, row.categories.as_deref(), row.tags.as_deref());
    let verdict = freshness::evaluate(title, age_months, classification.content_type, now.year());

    Ok(ArticleRecord {
        id,
        title: title.to_string(),
        url: url.to_string(),
        publish_date: dates::iso_date(&published),
        publish_timestamp: published.timestamp_millis(),
        categories: classification.categories,
        tags: classification.tags,
        age_months,
        content_type: classification.content_type,
        freshness: verdict.freshness,
        reasoning: verdict.reasoning,
    })
}

/// Whole 30.44-day months between `published` and `now`, zero for the future.
pub fn age_in_months(now: DateTime<Utc>, published: DateTime<Utc>) -> u32 {
    let elapsed = (now - published).num_milliseconds();
    if elapsed <= 0 {
        return 0;
    }
    u32::try_from(elapsed / MS_PER_MONTH).unwrap_or(u32::MAX)
}

fn is_in_scope(url: &str, options: &PipelineOptions) -> bool {
    options.url_markers.is_empty()
        || options
            .url_markers
            .iter()
            .any(|marker| url.contains(marker.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_age_boundary_is_floored() {
        let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let just_short = published + chrono::Duration::milliseconds(MS_PER_MONTH - 1);
        let exactly = published + chrono::Duration::milliseconds(MS_PER_MONTH);
        assert_eq!(age_in_months(just_short, published), 0);
        assert_eq!(age_in_months(exactly, published), 1);
    }

    #[test]
    fn test_empty_marker_list_keeps_everything() {
        let options = PipelineOptions { url_markers: vec![] };
        assert!(is_in_scope("https://example.com/docs/page", &options));
    }

    #[test]
    fn test_drop_reason_order_checks_title_first() {
        let row = RawArticleRow::default();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            build_record(&row, 0, now, &PipelineOptions::default()),
            Err(DropReason::MissingTitle)
        );
    }
}
