// Title classification: dates, taxonomy and content type.
//
// Everything in here is pure: the same inputs always give the same output,
// and nothing reads the clock or the environment.

pub mod content_type;
pub mod dates;
pub mod signals;
pub mod taxonomy;

use crate::articles::models::ContentType;

/// Taxonomy and content type derived for one article.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub content_type: ContentType,
}

/// Classify a title, preferring explicit CSV categories/tags when they are
/// non-empty after cleaning.
///
/// Explicit tags pass through the same canonicalization table as inferred
/// ones so both sources share one vocabulary.
pub fn classify(
    title: &str,
    explicit_categories: Option<&str>,
    explicit_tags: Option<&str>,
) -> Classification {
    let categories = explicit_categories
        .map(taxonomy::split_labels)
        .filter(|labels| !labels.is_empty())
        .unwrap_or_else(|| taxonomy::infer_categories(title));

    let tags = explicit_tags
        .map(|cell| taxonomy::canonicalize_tags(taxonomy::split_labels(cell)))
        .filter(|labels| !labels.is_empty())
        .unwrap_or_else(|| taxonomy::infer_tags(title));

    let content_type = content_type::classify_content_type(title, &categories);

    Classification {
        categories,
        tags,
        content_type,
    }
}
