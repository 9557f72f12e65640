// Colored terminal output for the article table, stat cards and overrides.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The main.rs command handlers delegate here.

use colored::Colorize;

use crate::articles::models::{ArticleCollection, Freshness};
use crate::articles::view::{EffectiveArticle, FreshnessSummary};
use crate::db::models::ArticleOverride;

/// Display the filtered article table, most recent first.
pub fn display_article_table(articles: &[EffectiveArticle<'_>], total: usize) {
    if articles.is_empty() {
        println!("No articles match these filters.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Articles ({} of {}) ===", articles.len(), total).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<10}  {:<52} {:<14}  {:<14}  {:>4}  {:<18}",
        "Id".dimmed(),
        "Published".dimmed(),
        "Title".dimmed(),
        "Type".dimmed(),
        "Freshness".dimmed(),
        "Age".dimmed(),
        "Category".dimmed(),
    );
    println!("  {}", "-".repeat(128).dimmed());

    for article in articles {
        let record = article.record;
        let marker = if article.is_overridden() { "*" } else { " " };
        println!(
            "  {:>4}  {:<10}  {:<52} {:<14}  {:<14}{} {:>4}  {:<18}",
            record.id,
            record.publish_date,
            super::truncate_chars(&record.title, 49),
            article.content_type().as_str(),
            colorize_freshness(article.freshness()),
            marker,
            format!("{}m", record.age_months),
            super::truncate_chars(record.primary_category(), 18),
        );
    }

    if articles.iter().any(|a| a.is_overridden()) {
        println!("\n  {}", "* tier or type set by an editor override".dimmed());
    }
}

/// Display one article with its reasoning, tags and override details.
pub fn display_article_detail(article: &EffectiveArticle<'_>) {
    let record = article.record;
    println!("\n{}", format!("=== #{} {} ===", record.id, record.title).bold());
    println!("  URL: {}", record.url);
    println!(
        "  Published: {} ({} months ago)",
        record.publish_date, record.age_months
    );
    println!("  Content type: {}", article.content_type());
    println!("  Freshness: {}", colorize_freshness(article.freshness()));
    println!("  Reasoning: {}", record.reasoning.dimmed());
    println!("  Categories: {}", record.categories.join(", "));
    if !record.tags.is_empty() {
        println!("  Tags: {}", record.tags.join(", "));
    }
    if article.is_overridden() {
        println!(
            "  Classified as: {} / {}",
            record.content_type, record.freshness
        );
    }
    if let Some(note) = article.note() {
        println!("  Editor note: {}", note.italic());
    }
}

/// Display the stat cards for a load.
pub fn display_summary(summary: &FreshnessSummary, collection: &ArticleCollection) {
    println!(
        "\n{}",
        format!("=== Freshness Summary ({} articles) ===", summary.total).bold()
    );
    println!();

    for tier in Freshness::ALL {
        let count = summary.count(tier);
        let pct = if summary.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / summary.total as f64
        };
        println!(
            "  {:<14} {:>5}  {:>5.1}%",
            colorize_freshness(tier),
            count,
            pct
        );
    }

    println!("\n  {}", "By content type:".dimmed());
    for (content_type, count) in &summary.by_content_type {
        println!("  {:<14} {:>5}", content_type.as_str(), count);
    }

    println!(
        "\n  {} categories, {} tags, {} overridden",
        collection.categories.len(),
        collection.tags.len(),
        summary.overridden
    );

    if summary.needs_update > 0 {
        println!(
            "  {} {} articles need an update",
            "!!".red().bold(),
            summary.needs_update
        );
    }
}

/// Display stored overrides.
pub fn display_overrides(overrides: &[ArticleOverride]) {
    if overrides.is_empty() {
        println!("No overrides stored.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Overrides ({}) ===", overrides.len()).bold()
    );
    for o in overrides {
        let tier = o
            .freshness
            .map(|f| colorize_freshness(f).to_string())
            .unwrap_or_else(|| "-".dimmed().to_string());
        let content_type = o.content_type.map_or("-", |c| c.as_str());
        let note = o.note.as_deref().unwrap_or("");
        println!(
            "  #{:<5} {:<14} {:<14} {} {}",
            o.article_id,
            tier,
            content_type,
            super::truncate_chars(note, 60),
            format!("({})", o.updated_at).dimmed()
        );
    }
}

/// Colorize a freshness tier.
pub fn colorize_freshness(tier: Freshness) -> colored::ColoredString {
    let label = tier.as_str();
    match tier {
        Freshness::Fresh => label.green(),
        Freshness::Aging => label.yellow(),
        Freshness::Stale => label.bright_red(),
        Freshness::NeedsUpdate => label.red().bold(),
    }
}
