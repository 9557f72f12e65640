// Presentation view: records paired with their overrides, plus filtering.
//
// Nothing here mutates an ArticleRecord. An override only changes what the
// view reports as the *effective* tier or type.

use std::collections::HashMap;

use crate::db::models::ArticleOverride;

use super::models::{ArticleCollection, ArticleRecord, ContentType, Freshness};

/// An article as the presentation layer shows it.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveArticle<'a> {
    pub record: &'a ArticleRecord,
    pub annotation: Option<&'a ArticleOverride>,
}

impl EffectiveArticle<'_> {
    pub fn freshness(&self) -> Freshness {
        self.annotation
            .and_then(|o| o.freshness)
            .unwrap_or(self.record.freshness)
    }

    pub fn content_type(&self) -> ContentType {
        self.annotation
            .and_then(|o| o.content_type)
            .unwrap_or(self.record.content_type)
    }

    pub fn note(&self) -> Option<&str> {
        self.annotation.and_then(|o| o.note.as_deref())
    }

    /// True when an override changes the tier or the type.
    pub fn is_overridden(&self) -> bool {
        self.freshness() != self.record.freshness || self.content_type() != self.record.content_type
    }
}

/// Pair every record in the collection with its override, keeping order.
pub fn effective_articles<'a>(
    collection: &'a ArticleCollection,
    overrides: &'a [ArticleOverride],
) -> Vec<EffectiveArticle<'a>> {
    let by_id: HashMap<usize, &ArticleOverride> =
        overrides.iter().map(|o| (o.article_id, o)).collect();
    collection
        .articles
        .iter()
        .map(|record| EffectiveArticle {
            record,
            annotation: by_id.get(&record.id).copied(),
        })
        .collect()
}

/// Table filters. Every set field must match; text matching is
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub freshness: Option<Freshness>,
    pub content_type: Option<ContentType>,
    pub category: Option<String>,
    pub tag: Option<String>,
    /// Substring of the title or URL
    pub search: Option<String>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &EffectiveArticle<'_>) -> bool {
        let record = article.record;

        if self.freshness.is_some_and(|f| f != article.freshness()) {
            return false;
        }
        if self.content_type.is_some_and(|c| c != article.content_type()) {
            return false;
        }
        if let Some(category) = &self.category {
            if !record
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(category.trim()))
            {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !record.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim())) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !record.title.to_lowercase().contains(&needle)
                && !record.url.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Apply the filter, keeping input order.
    pub fn apply<'a>(&self, articles: &[EffectiveArticle<'a>]) -> Vec<EffectiveArticle<'a>> {
        articles.iter().filter(|a| self.matches(a)).copied().collect()
    }
}

/// Stat-card counts over the effective view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreshnessSummary {
    pub total: usize,
    pub fresh: usize,
    pub aging: usize,
    pub stale: usize,
    pub needs_update: usize,
    pub overridden: usize,
    pub by_content_type: Vec<(ContentType, usize)>,
}

impl FreshnessSummary {
    pub fn from_articles(articles: &[EffectiveArticle<'_>]) -> Self {
        let mut summary = FreshnessSummary {
            total: articles.len(),
            ..Default::default()
        };
        for article in articles {
            match article.freshness() {
                Freshness::Fresh => summary.fresh += 1,
                Freshness::Aging => summary.aging += 1,
                Freshness::Stale => summary.stale += 1,
                Freshness::NeedsUpdate => summary.needs_update += 1,
            }
            if article.is_overridden() {
                summary.overridden += 1;
            }
        }
        summary.by_content_type = ContentType::ALL
            .into_iter()
            .map(|t| {
                let count = articles.iter().filter(|a| a.content_type() == t).count();
                (t, count)
            })
            .collect();
        summary
    }

    pub fn count(&self, tier: Freshness) -> usize {
        match tier {
            Freshness::Fresh => self.fresh,
            Freshness::Aging => self.aging,
            Freshness::Stale => self.stale,
            Freshness::NeedsUpdate => self.needs_update,
        }
    }
}
