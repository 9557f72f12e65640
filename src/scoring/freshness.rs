// Freshness evaluation: turns (content type, age, title) into a tier and a
// one-sentence rationale for the editorial team.
//
// Each content type owns its own threshold ladder. Thresholds are public
// constants so tests can pin the boundaries. The only outside input is the
// reference year, which callers derive from the same `now` they used for
// the article's age.

use crate::articles::models::{ContentType, Freshness};
use crate::classify::signals;

// Evergreen: conceptual explainers age slowly.
pub const EVERGREEN_FRESH_MONTHS: u32 = 24;
pub const EVERGREEN_AGING_MONTHS: u32 = 36;
pub const EVERGREEN_STALE_MONTHS: u32 = 48;

// Semi-evergreen: guides whose steps drift.
pub const SEMI_EVERGREEN_FRESH_MONTHS: u32 = 12;
pub const SEMI_EVERGREEN_AGING_MONTHS: u32 = 18;
pub const SEMI_EVERGREEN_STALE_MONTHS: u32 = 24;
/// Years a guide may name that are now always out of date.
pub const OUTDATED_TITLE_YEARS: std::ops::RangeInclusive<i32> = 2020..=2024;
/// A guide naming this year goes stale once it is older than
/// `REFERENCE_YEAR_STALE_AFTER_MONTHS`.
pub const REFERENCE_TITLE_YEAR: i32 = 2025;
pub const REFERENCE_YEAR_STALE_AFTER_MONTHS: u32 = 12;

// Time-sensitive: year-bound, event-bound and forecast content.
pub const TIME_SENSITIVE_FRESH_MONTHS: u32 = 6;
pub const TIME_SENSITIVE_AGING_MONTHS: u32 = 12;
pub const EVENT_EXPIRY_MONTHS: u32 = 3;

// News never degrades; these only select the rationale.
pub const NEWS_RECENT_MONTHS: u32 = 6;
pub const NEWS_CURRENT_MONTHS: u32 = 12;

/// A freshness tier together with the reason for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshnessVerdict {
    pub freshness: Freshness,
    pub reasoning: String,
}

impl FreshnessVerdict {
    fn new(freshness: Freshness, reasoning: impl Into<String>) -> Self {
        Self {
            freshness,
            reasoning: reasoning.into(),
        }
    }
}

/// Evaluate an article's freshness.
///
/// `current_year` is only consulted for time-sensitive content.
pub fn evaluate(
    title: &str,
    age_months: u32,
    content_type: ContentType,
    current_year: i32,
) -> FreshnessVerdict {
    match content_type {
        ContentType::Evergreen => evaluate_evergreen(age_months),
        ContentType::SemiEvergreen => evaluate_semi_evergreen(title, age_months),
        ContentType::TimeSensitive => evaluate_time_sensitive(title, age_months, current_year),
        ContentType::News => evaluate_news(age_months),
    }
}

fn evaluate_evergreen(age: u32) -> FreshnessVerdict {
    let age_text = months(age);
    if age < EVERGREEN_FRESH_MONTHS {
        FreshnessVerdict::new(
            Freshness::Fresh,
            format!("Evergreen explainer, {age_text} old; the core concepts are still accurate."),
        )
    } else if age < EVERGREEN_AGING_MONTHS {
        FreshnessVerdict::new(
            Freshness::Aging,
            format!("Evergreen explainer, {age_text} old; worth a light review for dated examples."),
        )
    } else if age < EVERGREEN_STALE_MONTHS {
        FreshnessVerdict::new(
            Freshness::Stale,
            format!("Evergreen explainer, {age_text} old; examples and figures are likely outdated."),
        )
    } else {
        FreshnessVerdict::new(
            Freshness::NeedsUpdate,
            "Evergreen explainer over four years old; rewrite to keep it accurate and competitive.",
        )
    }
}

fn evaluate_semi_evergreen(title: &str, age: u32) -> FreshnessVerdict {
    let years = signals::years_in(title);

    if let Some(year) = years
        .iter()
        .copied()
        .filter(|y| OUTDATED_TITLE_YEARS.contains(y))
        .max()
    {
        return FreshnessVerdict::new(
            Freshness::NeedsUpdate,
            format!("Title references {year}, which is now outdated; update the year and any time-bound details."),
        );
    }

    if years.contains(&REFERENCE_TITLE_YEAR) && age > REFERENCE_YEAR_STALE_AFTER_MONTHS {
        return FreshnessVerdict::new(
            Freshness::Stale,
            format!(
                "Title references {REFERENCE_TITLE_YEAR} and the guide is {} old; check the details still hold.",
                months(age)
            ),
        );
    }

    let age_text = months(age);
    if age < SEMI_EVERGREEN_FRESH_MONTHS {
        FreshnessVerdict::new(
            Freshness::Fresh,
            format!("Guide is {age_text} old; steps and details should still be current."),
        )
    } else if age < SEMI_EVERGREEN_AGING_MONTHS {
        FreshnessVerdict::new(
            Freshness::Aging,
            format!("Guide is {age_text} old; product steps and fees may have changed."),
        )
    } else if age < SEMI_EVERGREEN_STALE_MONTHS {
        FreshnessVerdict::new(
            Freshness::Stale,
            format!("Guide is {age_text} old; steps and screenshots are likely outdated."),
        )
    } else {
        FreshnessVerdict::new(
            Freshness::NeedsUpdate,
            format!("Guide is {age_text} old; the process has probably changed since publication."),
        )
    }
}

fn evaluate_time_sensitive(title: &str, age: u32, current_year: i32) -> FreshnessVerdict {
    // Years after the current one say nothing about staleness yet.
    if let Some(year) = signals::latest_year_through(title, current_year) {
        if year < current_year - 1 {
            return FreshnessVerdict::new(
                Freshness::NeedsUpdate,
                format!("Tied to {year}, more than a year ago; update or retire it."),
            );
        }
        if year < current_year {
            return FreshnessVerdict::new(
                Freshness::Stale,
                format!("Tied to {year}, which is becoming outdated; refresh it for {current_year}."),
            );
        }
        return FreshnessVerdict::new(
            Freshness::Fresh,
            format!("Tied to the current year ({year}); still relevant."),
        );
    }

    if signals::has_event_signal(title) && age > EVENT_EXPIRY_MONTHS {
        return FreshnessVerdict::new(
            Freshness::NeedsUpdate,
            format!("Event-driven content, {} old; the event has most likely passed.", months(age)),
        );
    }

    let age_text = months(age);
    if age < TIME_SENSITIVE_FRESH_MONTHS {
        FreshnessVerdict::new(
            Freshness::Fresh,
            format!("Time-sensitive content, {age_text} old; still timely."),
        )
    } else if age < TIME_SENSITIVE_AGING_MONTHS {
        FreshnessVerdict::new(
            Freshness::Aging,
            format!("Time-sensitive content, {age_text} old; starting to date."),
        )
    } else {
        FreshnessVerdict::new(
            Freshness::NeedsUpdate,
            "Time-sensitive content over a year old; likely outdated.",
        )
    }
}

fn evaluate_news(age: u32) -> FreshnessVerdict {
    if age < NEWS_RECENT_MONTHS {
        FreshnessVerdict::new(
            Freshness::Fresh,
            format!("Recent news, {} old; accurate as published.", months(age)),
        )
    } else if age < NEWS_CURRENT_MONTHS {
        FreshnessVerdict::new(
            Freshness::Fresh,
            "News from the past year; kept as a record of what happened.",
        )
    } else {
        FreshnessVerdict::new(
            Freshness::Fresh,
            "Historical news; it reflects its publication date and does not need updating.",
        )
    }
}

/// "1 month", "7 months"
fn months(age: u32) -> String {
    if age == 1 {
        "1 month".to_string()
    } else {
        format!("{age} months")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_pluralization() {
        assert_eq!(months(0), "0 months");
        assert_eq!(months(1), "1 month");
        assert_eq!(months(13), "13 months");
    }

    #[test]
    fn test_news_rationales_are_distinct() {
        let recent = evaluate_news(2).reasoning;
        let current = evaluate_news(8).reasoning;
        let historical = evaluate_news(40).reasoning;
        assert_ne!(recent, current);
        assert_ne!(current, historical);
        assert_ne!(recent, historical);
    }

    #[test]
    fn test_future_year_falls_through_to_age() {
        let verdict = evaluate_time_sensitive("Outlook for 2031", 2, 2026);
        assert_eq!(verdict.freshness, Freshness::Fresh);
        assert!(verdict.reasoning.starts_with("Time-sensitive content"));
    }
}
