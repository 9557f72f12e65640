// Markdown review queue: a shareable report of what needs editorial work.
//
// Articles are grouped by effective tier, most urgent first. Fresh articles
// are only counted, not listed, to keep the report focused.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::articles::models::{ArticleCollection, Freshness};
use crate::articles::view::{effective_articles, FreshnessSummary};
use crate::db::models::ArticleOverride;

/// Render the review queue as Markdown.
pub fn render_report(
    collection: &ArticleCollection,
    overrides: &[ArticleOverride],
    generated_at: DateTime<Utc>,
) -> String {
    let articles = effective_articles(collection, overrides);
    let summary = FreshnessSummary::from_articles(&articles);
    let mut out = String::new();

    let _ = writeln!(out, "# Blog Freshness Report\n");
    let _ = writeln!(
        out,
        "Generated {} from {} articles.\n",
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        summary.total
    );

    let _ = writeln!(out, "| Tier | Articles |");
    let _ = writeln!(out, "|------|----------|");
    for tier in Freshness::ALL {
        let _ = writeln!(out, "| {} | {} |", tier, summary.count(tier));
    }
    out.push('\n');

    for tier in [Freshness::NeedsUpdate, Freshness::Stale, Freshness::Aging] {
        let in_tier: Vec<_> = articles.iter().filter(|a| a.freshness() == tier).collect();
        if in_tier.is_empty() {
            continue;
        }

        let _ = writeln!(out, "## {} ({})\n", tier, in_tier.len());
        for article in in_tier {
            let record = article.record;
            let _ = writeln!(
                out,
                "- [{}]({}) ({}, {}, {} months)",
                escape_brackets(&record.title),
                link_destination(&record.url),
                record.publish_date,
                article.content_type(),
                record.age_months
            );
            let _ = writeln!(out, "  - {}", record.reasoning);
            if let Some(note) = article.note() {
                let _ = writeln!(out, "  - Editor note: {note}");
            }
        }
        out.push('\n');
    }

    out
}

/// Write the report to `path`, creating parent directories as needed.
pub fn generate_report(
    collection: &ArticleCollection,
    overrides: &[ArticleOverride],
    generated_at: DateTime<Utc>,
    path: &str,
) -> Result<PathBuf> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
        }
    }

    let report = render_report(collection, overrides, generated_at);
    std::fs::write(path, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(path.to_path_buf())
}

fn escape_brackets(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Angle-bracket link target, so parentheses and spaces in a URL cannot
/// end the link early.
fn link_destination(url: &str) -> String {
    format!("<{}>", url.replace('<', "%3C").replace('>', "%3E"))
}
