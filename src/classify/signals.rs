// Title signals shared by the content-type cascade and the freshness
// evaluator: year tokens, event markers, forecast phrasing and the
// framing phrases that separate guides from news.
//
// Every pattern is case-insensitive and compiled once. A pattern that fails
// to compile matches nothing rather than panicking.

use std::sync::LazyLock;

use regex_lite::Regex;

macro_rules! signal {
    ($name:ident, $pattern:expr) => {
        pub static $name: LazyLock<Option<Regex>> =
            LazyLock::new(|| Regex::new(&format!("(?i){}", $pattern)).ok());
    };
}

/// The house brand; mentions of it count as brand-adjacent.
pub const HOUSE_BRAND: &str = "transak";

// ── Brands ─────────────────────────────────────────────────────────────────
signal!(
    BRAND_MENTION,
    r"\b(?:transak|metamask|coinbase|binance|ledger|trezor|trust wallet|phantom|rainbow|argent|exodus|polygon|solana|ripple|stellar|visa|mastercard|apple pay|google pay|stripe|paypal|revolut|uniswap|opensea|immutable|arbitrum|optimism|avalanche|chainlink|circle|fireblocks|sandbox|decentraland|axie)\b"
);

// ── Years 2020–2039 ────────────────────────────────────────────────────────
signal!(YEAR_TOKEN, r"\b(20[23]\d)\b");

// ── News / press ───────────────────────────────────────────────────────────
/// Partnership and integration phrasing. Shared with the Partnerships
/// category rule so the news step and the category never disagree.
pub const PARTNERSHIP_PATTERN: &str = r"\b(?:partner(?:s|ed|ing|ship|ships)?|integrat(?:es|ed|ing|ion|ions)|collaborat(?:es|ed|ing|ion)|teams? up|joins? forces|x)\b";
signal!(PARTNERSHIP_PHRASING, PARTNERSHIP_PATTERN);
signal!(LAUNCH_PHRASING, r"\b(?:launch(?:es|ed|ing)?|unveil(?:s|ed)?|rolls? out)\b");
signal!(
    AVAILABILITY_PHRASING,
    r"\b(?:now (?:available|live|supports?|accepts?)|is live|goes live|adds support for)\b"
);

// ── Time-bound content ─────────────────────────────────────────────────────
signal!(
    EVENT_KEYWORDS,
    r"\b(?:events?|conference|summit|hackathon|webinar|ama|meetup|countdown|upcoming|token ?2049|ethdenver|devcon|ethcc|black friday|cyber monday|christmas|new year)\b"
);
signal!(
    FORECAST_PHRASING,
    r"\b(?:price predictions?|predictions?|forecasts?|outlook|trends to watch|what to expect|recap|this (?:week|month|year)|weekly|monthly)\b"
);

// ── Guide framing ──────────────────────────────────────────────────────────
signal!(
    EXPLAINER_PHRASING,
    r"(?:\bwhat (?:is|are)\b|\bexplained\b|\ba guide\b|\bguide to\b|\bvs\.?(?:\s|$)|\bversus\b|\bunderstanding\b|\bdecoding\b|\bbeginner['’]?s guide\b)"
);
signal!(HOW_TO_PHRASING, r"\bhow to\b");
signal!(
    CASE_STUDY_PHRASING,
    r"\b(?:case study|success story|customer story|how \w+ (?:uses|used|scaled|grew|increased|boosted))\b"
);

fn matches(pattern: &LazyLock<Option<Regex>>, title: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(title))
}

/// Every year token (2020–2039) in the title, in order of appearance.
pub fn years_in(title: &str) -> Vec<i32> {
    let Some(re) = YEAR_TOKEN.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(title)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// The most recent year token in the title that is not after `max_year`.
///
/// A forward-looking year ("outlook for 2031") must not hide the past year
/// the article is actually tied to.
pub fn latest_year_through(title: &str, max_year: i32) -> Option<i32> {
    years_in(title).into_iter().filter(|y| *y <= max_year).max()
}

pub fn has_year(title: &str) -> bool {
    matches(&YEAR_TOKEN, title)
}

pub fn mentions_brand(title: &str) -> bool {
    matches(&BRAND_MENTION, title)
}

/// Partnership, launch or integration phrasing.
pub fn has_press_phrasing(title: &str) -> bool {
    matches(&PARTNERSHIP_PHRASING, title) || matches(&LAUNCH_PHRASING, title)
}

/// "Now available", "now live", "now supports" and friends.
pub fn has_availability_phrasing(title: &str) -> bool {
    matches(&AVAILABILITY_PHRASING, title)
}

pub fn has_event_signal(title: &str) -> bool {
    matches(&EVENT_KEYWORDS, title)
}

pub fn has_forecast_phrasing(title: &str) -> bool {
    matches(&FORECAST_PHRASING, title)
}

pub fn has_explainer_phrasing(title: &str) -> bool {
    matches(&EXPLAINER_PHRASING, title)
}

pub fn has_how_to_phrasing(title: &str) -> bool {
    matches(&HOW_TO_PHRASING, title)
}

pub fn has_case_study_signal(title: &str) -> bool {
    matches(&CASE_STUDY_PHRASING, title)
}

/// Guides carry a year as context ("in 2024"), not as the subject.
pub fn has_guide_framing(title: &str) -> bool {
    has_how_to_phrasing(title) || has_explainer_phrasing(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_signals_compile() {
        for pattern in [
            &BRAND_MENTION,
            &YEAR_TOKEN,
            &PARTNERSHIP_PHRASING,
            &LAUNCH_PHRASING,
            &AVAILABILITY_PHRASING,
            &EVENT_KEYWORDS,
            &FORECAST_PHRASING,
            &EXPLAINER_PHRASING,
            &HOW_TO_PHRASING,
            &CASE_STUDY_PHRASING,
        ] {
            assert!(pattern.is_some());
        }
    }

    #[test]
    fn test_years_in_range_only() {
        assert_eq!(years_in("From 2019 to 2021 and 2024"), vec![2021, 2024]);
        assert_eq!(years_in("The 20245 club"), Vec::<i32>::new());
        assert_eq!(latest_year_through("2023 vs 2025 outlook", 2025), Some(2025));
        assert_eq!(latest_year_through("2023 vs 2031 outlook", 2026), Some(2023));
        assert_eq!(latest_year_through("Outlook for 2031", 2026), None);
    }

    #[test]
    fn test_vs_needs_word_boundary() {
        assert!(has_explainer_phrasing("Bitcoin vs Ethereum"));
        assert!(!has_explainer_phrasing("Canvas Wallets"));
    }
}
