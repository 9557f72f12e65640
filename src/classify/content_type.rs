// Content-type classification: decides *why* an article ages the way it does.
//
// The cascade is an ordered table of (step, predicate, outcome). The first
// step whose predicate holds decides the type; later steps never run. Keep
// the table order in sync with the step docs below, since each step relies
// on every earlier step having failed.

use crate::articles::models::ContentType;

use super::signals;
use super::taxonomy::{ANNOUNCEMENTS, NEW_LISTINGS, PARTNERSHIPS, PODCAST};

/// Categories that mark an article as news/press regardless of phrasing.
pub const NEWS_CATEGORIES: &[&str] = &[ANNOUNCEMENTS, PARTNERSHIPS, NEW_LISTINGS, "News", "Press"];

/// Inputs to one cascade step.
pub struct TitleContext<'a> {
    pub title: &'a str,
    pub categories: &'a [String],
}

impl TitleContext<'_> {
    fn has_category(&self, wanted: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(wanted))
    }
}

/// One step of the cascade.
pub struct CascadeStep {
    pub name: &'static str,
    pub decide: fn(&TitleContext<'_>) -> Option<ContentType>,
}

/// The cascade in evaluation order.
pub const CONTENT_TYPE_CASCADE: &[CascadeStep] = &[
    CascadeStep {
        name: "news",
        decide: news_step,
    },
    CascadeStep {
        name: "time-bound",
        decide: time_bound_step,
    },
    CascadeStep {
        name: "explainer",
        decide: explainer_step,
    },
    CascadeStep {
        name: "how-to",
        decide: how_to_step,
    },
    CascadeStep {
        name: "podcast",
        decide: podcast_step,
    },
    CascadeStep {
        name: "case-study",
        decide: case_study_step,
    },
];

/// Classify a title (with its resolved categories) into a content type.
pub fn classify_content_type(title: &str, categories: &[String]) -> ContentType {
    let ctx = TitleContext { title, categories };
    CONTENT_TYPE_CASCADE
        .iter()
        .find_map(|step| (step.decide)(&ctx))
        .unwrap_or(ContentType::SemiEvergreen)
}

/// Name of the step that decided, or "default" when none fired.
pub fn deciding_step(title: &str, categories: &[String]) -> &'static str {
    let ctx = TitleContext { title, categories };
    CONTENT_TYPE_CASCADE
        .iter()
        .find(|step| (step.decide)(&ctx).is_some())
        .map_or("default", |step| step.name)
}

/// (a) News category, partnership/launch/integration phrasing, or
/// availability phrasing.
fn news_step(ctx: &TitleContext<'_>) -> Option<ContentType> {
    let news = NEWS_CATEGORIES.iter().any(|c| ctx.has_category(c))
        || signals::has_press_phrasing(ctx.title)
        || signals::has_availability_phrasing(ctx.title);
    news.then_some(ContentType::News)
}

/// (b) A year that is the subject of the title (not a guide's context),
/// a named event, or forecast phrasing.
fn time_bound_step(ctx: &TitleContext<'_>) -> Option<ContentType> {
    let year_bound = signals::has_year(ctx.title) && !signals::has_guide_framing(ctx.title);
    let time_bound = year_bound
        || signals::has_event_signal(ctx.title)
        || signals::has_forecast_phrasing(ctx.title);
    time_bound.then_some(ContentType::TimeSensitive)
}

/// (c) Conceptual explainers; a year in the title downgrades them.
fn explainer_step(ctx: &TitleContext<'_>) -> Option<ContentType> {
    if !signals::has_explainer_phrasing(ctx.title) {
        return None;
    }
    if signals::has_year(ctx.title) {
        Some(ContentType::SemiEvergreen)
    } else {
        Some(ContentType::Evergreen)
    }
}

/// (d)
fn how_to_step(ctx: &TitleContext<'_>) -> Option<ContentType> {
    signals::has_how_to_phrasing(ctx.title).then_some(ContentType::SemiEvergreen)
}

/// (e)
fn podcast_step(ctx: &TitleContext<'_>) -> Option<ContentType> {
    ctx.has_category(PODCAST).then_some(ContentType::Evergreen)
}

/// (f)
fn case_study_step(ctx: &TitleContext<'_>) -> Option<ContentType> {
    signals::has_case_study_signal(ctx.title).then_some(ContentType::SemiEvergreen)
}
