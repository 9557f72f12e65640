// Unit tests for freshness evaluation.
//
// Pins every threshold boundary per content type, the title-year rules for
// semi-evergreen and time-sensitive content, and the rule that news never
// degrades.

use blogfresh::articles::models::{ContentType, Freshness};
use blogfresh::scoring::freshness::{
    evaluate, EVENT_EXPIRY_MONTHS, EVERGREEN_AGING_MONTHS, EVERGREEN_FRESH_MONTHS,
    EVERGREEN_STALE_MONTHS, REFERENCE_YEAR_STALE_AFTER_MONTHS, SEMI_EVERGREEN_AGING_MONTHS,
    SEMI_EVERGREEN_FRESH_MONTHS, SEMI_EVERGREEN_STALE_MONTHS, TIME_SENSITIVE_AGING_MONTHS,
    TIME_SENSITIVE_FRESH_MONTHS,
};

const CURRENT_YEAR: i32 = 2025;

fn tier(title: &str, age: u32, content_type: ContentType) -> Freshness {
    evaluate(title, age, content_type, CURRENT_YEAR).freshness
}

// ============================================================
// Evergreen
// ============================================================

#[test]
fn evergreen_boundaries() {
    let t = |age| tier("What is a wallet?", age, ContentType::Evergreen);
    assert_eq!(t(0), Freshness::Fresh);
    assert_eq!(t(EVERGREEN_FRESH_MONTHS - 1), Freshness::Fresh);
    assert_eq!(t(EVERGREEN_FRESH_MONTHS), Freshness::Aging);
    assert_eq!(t(EVERGREEN_AGING_MONTHS - 1), Freshness::Aging);
    assert_eq!(t(EVERGREEN_AGING_MONTHS), Freshness::Stale);
    assert_eq!(t(EVERGREEN_STALE_MONTHS - 1), Freshness::Stale);
    assert_eq!(t(EVERGREEN_STALE_MONTHS), Freshness::NeedsUpdate);
}

#[test]
fn evergreen_reasoning_mentions_age() {
    let verdict = evaluate("What is a wallet?", 19, ContentType::Evergreen, CURRENT_YEAR);
    assert!(verdict.reasoning.starts_with("Evergreen explainer"));
    assert!(verdict.reasoning.contains("19 months"));
}

// ============================================================
// Semi-evergreen
// ============================================================

#[test]
fn semi_evergreen_boundaries() {
    let t = |age| tier("How to set up a wallet", age, ContentType::SemiEvergreen);
    assert_eq!(t(SEMI_EVERGREEN_FRESH_MONTHS - 1), Freshness::Fresh);
    assert_eq!(t(SEMI_EVERGREEN_FRESH_MONTHS), Freshness::Aging);
    assert_eq!(t(SEMI_EVERGREEN_AGING_MONTHS - 1), Freshness::Aging);
    assert_eq!(t(SEMI_EVERGREEN_AGING_MONTHS), Freshness::Stale);
    assert_eq!(t(SEMI_EVERGREEN_STALE_MONTHS - 1), Freshness::Stale);
    assert_eq!(t(SEMI_EVERGREEN_STALE_MONTHS), Freshness::NeedsUpdate);
}

#[test]
fn semi_evergreen_outdated_year_needs_update_at_any_age() {
    for year in 2020..=2024 {
        let title = format!("How to Buy Crypto in {year}");
        let verdict = evaluate(&title, 0, ContentType::SemiEvergreen, CURRENT_YEAR);
        assert_eq!(verdict.freshness, Freshness::NeedsUpdate, "year {year}");
        assert!(verdict.reasoning.contains(&year.to_string()));
    }
}

#[test]
fn semi_evergreen_reference_year_goes_stale_after_a_year() {
    let title = "How to Buy Crypto in 2025";
    assert_eq!(
        tier(title, REFERENCE_YEAR_STALE_AFTER_MONTHS + 1, ContentType::SemiEvergreen),
        Freshness::Stale
    );
    // At exactly the limit the normal ladder applies
    assert_eq!(
        tier(title, REFERENCE_YEAR_STALE_AFTER_MONTHS, ContentType::SemiEvergreen),
        Freshness::Aging
    );
    assert_eq!(tier(title, 2, ContentType::SemiEvergreen), Freshness::Fresh);
}

#[test]
fn semi_evergreen_other_years_use_the_ladder() {
    assert_eq!(
        tier("Wallet checklist for 2026", 3, ContentType::SemiEvergreen),
        Freshness::Fresh
    );
}

// ============================================================
// Time-sensitive
// ============================================================

#[test]
fn time_sensitive_title_year_decides() {
    let t = |title: &str| tier(title, 1, ContentType::TimeSensitive);
    assert_eq!(t("Crypto Outlook 2023"), Freshness::NeedsUpdate);
    assert_eq!(t("Ethereum Price Prediction 2024"), Freshness::Stale);
    assert_eq!(
        tier("Crypto Outlook 2025", 20, ContentType::TimeSensitive),
        Freshness::Fresh
    );
}

#[test]
fn time_sensitive_uses_latest_year() {
    assert_eq!(
        tier("From 2023 to 2025: what changed", 1, ContentType::TimeSensitive),
        Freshness::Fresh
    );
}

#[test]
fn future_year_does_not_hide_a_past_one() {
    let verdict = evaluate(
        "Crypto recap 2023 and outlook for 2031",
        1,
        ContentType::TimeSensitive,
        2026,
    );
    assert_eq!(verdict.freshness, Freshness::NeedsUpdate);
    assert!(verdict.reasoning.contains("2023"));
}

#[test]
fn only_future_years_fall_through_to_age() {
    assert_eq!(
        evaluate("Outlook for 2031", 7, ContentType::TimeSensitive, 2026).freshness,
        Freshness::Aging
    );
}

#[test]
fn previous_year_rationale_names_both_years() {
    let verdict = evaluate(
        "Ethereum Price Prediction 2024",
        17,
        ContentType::TimeSensitive,
        CURRENT_YEAR,
    );
    assert_eq!(verdict.freshness, Freshness::Stale);
    assert!(verdict.reasoning.contains("2024"));
    assert!(verdict.reasoning.contains("2025"));
}

#[test]
fn event_expires_after_three_months() {
    let t = |age| tier("Meet us at the Lisbon summit", age, ContentType::TimeSensitive);
    assert_eq!(t(EVENT_EXPIRY_MONTHS), Freshness::Fresh);
    assert_eq!(t(EVENT_EXPIRY_MONTHS + 1), Freshness::NeedsUpdate);
}

#[test]
fn time_sensitive_age_ladder() {
    let t = |age| tier("Weekly market recap", age, ContentType::TimeSensitive);
    assert_eq!(t(TIME_SENSITIVE_FRESH_MONTHS - 1), Freshness::Fresh);
    assert_eq!(t(TIME_SENSITIVE_FRESH_MONTHS), Freshness::Aging);
    assert_eq!(t(TIME_SENSITIVE_AGING_MONTHS - 1), Freshness::Aging);
    assert_eq!(t(TIME_SENSITIVE_AGING_MONTHS), Freshness::NeedsUpdate);
}

// ============================================================
// News
// ============================================================

#[test]
fn news_is_always_fresh() {
    for age in [0, 5, 6, 11, 12, 60, 240] {
        assert_eq!(
            tier("Transak raises Series B", age, ContentType::News),
            Freshness::Fresh,
            "age {age}"
        );
    }
}

#[test]
fn every_verdict_has_reasoning() {
    for content_type in ContentType::ALL {
        for age in [0, 7, 13, 30, 50] {
            let verdict = evaluate("Anything at all", age, content_type, CURRENT_YEAR);
            assert!(!verdict.reasoning.trim().is_empty());
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let titles = [
        "What is a wallet?",
        "How to Buy Crypto in 2023",
        "Crypto Outlook 2025",
        "Meet us at the Lisbon summit",
        "Transak raises Series B",
    ];
    for content_type in ContentType::ALL {
        for title in titles {
            for age in [0, 3, 4, 6, 12, 13, 24, 36, 48, 120] {
                let first = evaluate(title, age, content_type, CURRENT_YEAR);
                let second = evaluate(title, age, content_type, CURRENT_YEAR);
                assert_eq!(first, second, "{content_type} {title:?} at {age} months");
            }
        }
    }
}
