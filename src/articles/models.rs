// Article models: the types that flow out of the classification pipeline.
//
// Records are built once per load and never mutated afterwards. Anything the
// presentation layer wants to change about a record lives in the override
// store (see db::models::ArticleOverride) keyed by the record's id.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single blog article after classification and freshness scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    /// 0-based position among rows that survived filtering, in file order
    pub id: usize,
    pub title: String,
    pub url: String,
    /// UTC calendar date of `publish_timestamp`, formatted YYYY-MM-DD
    pub publish_date: String,
    /// Publish instant in epoch milliseconds
    pub publish_timestamp: i64,
    /// Ordered categories; the first one is the primary category
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub age_months: u32,
    pub content_type: ContentType,
    pub freshness: Freshness,
    /// One-sentence explanation of the freshness verdict
    pub reasoning: String,
}

impl ArticleRecord {
    /// The primary (first) category, used for compact display.
    pub fn primary_category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or("")
    }
}

/// The result of one pipeline load: sorted records plus the vocabularies
/// the presentation layer uses for its filter menus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleCollection {
    /// Sorted by publish timestamp, most recent first
    pub articles: Vec<ArticleRecord>,
    /// Every distinct category across `articles`, sorted
    pub categories: Vec<String>,
    /// Every distinct tag across `articles`, sorted
    pub tags: Vec<String>,
}

impl ArticleCollection {
    /// Look up a record by its load-local id.
    pub fn get(&self, id: usize) -> Option<&ArticleRecord> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Why an article ages the way it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// Conceptual explainers that stay accurate for years
    Evergreen,
    /// How-tos and guides whose details drift
    SemiEvergreen,
    /// Year-bound, event-bound or forecast content
    TimeSensitive,
    /// Announcements and press, kept as a historical record
    News,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Evergreen,
        ContentType::SemiEvergreen,
        ContentType::TimeSensitive,
        ContentType::News,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Evergreen => "evergreen",
            ContentType::SemiEvergreen => "semi-evergreen",
            ContentType::TimeSensitive => "time-sensitive",
            ContentType::News => "news",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown content type '{s}' (expected evergreen, semi-evergreen, time-sensitive or news)"
                )
            })
    }
}

/// Editorial urgency tier. Declaration order is severity order, so the
/// derived `Ord` gives fresh < aging < stale < needs-update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Freshness {
    Fresh,
    Aging,
    Stale,
    NeedsUpdate,
}

impl Freshness {
    pub const ALL: [Freshness; 4] = [
        Freshness::Fresh,
        Freshness::Aging,
        Freshness::Stale,
        Freshness::NeedsUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Aging => "aging",
            Freshness::Stale => "stale",
            Freshness::NeedsUpdate => "needs-update",
        }
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Freshness {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        Freshness::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown freshness tier '{s}' (expected fresh, aging, stale or needs-update)"
                )
            })
    }
}
