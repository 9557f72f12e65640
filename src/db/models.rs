// Override models: presentation-layer annotations stored next to, never
// inside, the classified article records.
//
// These are keyed by the article id from the current load. The pipeline
// never reads them; the presentation layer pairs them with records at
// display time (see articles::view::EffectiveArticle).

use serde::{Deserialize, Serialize};

use crate::articles::models::{ContentType, Freshness};

/// A stored editorial override for one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleOverride {
    pub article_id: usize,
    pub freshness: Option<Freshness>,
    pub content_type: Option<ContentType>,
    pub note: Option<String>,
    pub updated_at: String,
}

/// A partial update applied with read-modify-write semantics.
///
/// `Some` replaces the stored value, `None` keeps it. A note of `Some("")`
/// (after trimming) clears the stored note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverridePatch {
    pub freshness: Option<Freshness>,
    pub content_type: Option<ContentType>,
    pub note: Option<String>,
}

impl OverridePatch {
    /// Merge this patch onto the currently stored values.
    pub fn merge_onto(
        &self,
        current: Option<&ArticleOverride>,
    ) -> (Option<Freshness>, Option<ContentType>, Option<String>) {
        let freshness = self.freshness.or(current.and_then(|c| c.freshness));
        let content_type = self.content_type.or(current.and_then(|c| c.content_type));
        let note = match &self.note {
            Some(note) if note.trim().is_empty() => None,
            Some(note) => Some(note.trim().to_string()),
            None => current.and_then(|c| c.note.clone()),
        };
        (freshness, content_type, note)
    }
}
