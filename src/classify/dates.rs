// Date normalization: turns the loosely formatted "Publish date" column
// into a single UTC instant.
//
// CMS exports mix "17 Oct 2023", "17/10/2023" and ISO timestamps in the same
// file. Forms are tried in a fixed order and the first one that produces a
// valid calendar date wins. Every date-only form resolves to UTC midnight so
// the same calendar date always maps to the same instant.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex_lite::Regex;

/// "17 Oct 2023", "3 September, 2024", "1 Sept. 2022"
static DAY_MONTH_NAME_YEAR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\.?,?\s+(\d{4})\b").ok()
});

/// "17/10/2023", day first
static DAY_MONTH_YEAR_SLASH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").ok());

/// Naive date-time layouts accepted by the generic fallback (read as UTC).
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts accepted by the generic fallback (UTC midnight).
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    // Only reached when the day-first reading is not a valid date
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Parse a raw date string into a UTC instant.
///
/// Returns `None` for empty input or when no recognized form matches; the
/// caller drops the row in that case.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    parse_day_month_name(trimmed)
        .or_else(|| parse_day_month_slash(trimmed))
        .or_else(|| parse_generic(trimmed))
}

/// Format the UTC calendar date of an instant as YYYY-MM-DD.
pub fn iso_date(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Resolve an English month name or abbreviation to its 1-based number.
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let month = match lower.as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn parse_day_month_name(s: &str) -> Option<DateTime<Utc>> {
    let caps = DAY_MONTH_NAME_YEAR.as_ref()?.captures(s)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = month_from_name(caps.get(2)?.as_str())?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    utc_midnight(year, month, day)
}

fn parse_day_month_slash(s: &str) -> Option<DateTime<Utc>> {
    let caps = DAY_MONTH_YEAR_SLASH.as_ref()?.captures(s)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;
    utc_midnight(year, month, day)
}

fn parse_generic(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn utc_midnight(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(DAY_MONTH_NAME_YEAR.is_some());
        assert!(DAY_MONTH_YEAR_SLASH.is_some());
    }

    #[test]
    fn test_invalid_named_date_falls_through() {
        // 31 Feb is not a date; no later form accepts it either
        assert!(parse_day_month_name("31 Feb 2023").is_none());
        assert!(parse_date("31 Feb 2023").is_none());
    }

    #[test]
    fn test_unknown_month_name() {
        assert!(month_from_name("Octember").is_none());
        assert_eq!(month_from_name("SEPT"), Some(9));
    }
}
