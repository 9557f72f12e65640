// Unit tests for date normalization.
//
// Tests the three recognized forms (named month, day-first slash, generic
// fallback), their precedence, and the UTC-midnight policy for date-only
// inputs.

use chrono::{TimeZone, Utc};

use blogfresh::classify::dates::{iso_date, month_from_name, parse_date};

fn iso(raw: &str) -> Option<String> {
    parse_date(raw).map(|dt| iso_date(&dt))
}

// ============================================================
// Form 1: D[D] <Month name> YYYY
// ============================================================

#[test]
fn named_month_abbreviated() {
    assert_eq!(iso("17 Oct 2023").as_deref(), Some("2023-10-17"));
}

#[test]
fn named_month_full_with_comma() {
    assert_eq!(iso("3 September, 2024").as_deref(), Some("2024-09-03"));
}

#[test]
fn named_month_sept_with_period() {
    assert_eq!(iso("1 Sept. 2022").as_deref(), Some("2022-09-01"));
}

#[test]
fn named_month_is_case_insensitive() {
    assert_eq!(iso("05 JAN 2024").as_deref(), Some("2024-01-05"));
}

#[test]
fn named_month_invalid_day_is_rejected() {
    assert!(parse_date("30 Feb 2024").is_none());
}

// ============================================================
// Form 2: D[D]/M[M]/YYYY is day first
// ============================================================

#[test]
fn slash_date_is_day_first() {
    assert_eq!(iso("03/04/2024").as_deref(), Some("2024-04-03"));
}

#[test]
fn slash_date_single_digits() {
    assert_eq!(iso("1/2/2025").as_deref(), Some("2025-02-01"));
}

#[test]
fn ambiguous_slash_date_stays_day_first() {
    assert_eq!(iso("10/11/2023").as_deref(), Some("2023-11-10"));
}

#[test]
fn impossible_day_first_falls_back_to_month_first() {
    assert_eq!(iso("10/17/2023").as_deref(), Some("2023-10-17"));
    assert_eq!(iso("12/13/2024").as_deref(), Some("2024-12-13"));
}

#[test]
fn named_and_slash_forms_agree() {
    let named = parse_date("17 Oct 2023").unwrap();
    let slash = parse_date("17/10/2023").unwrap();
    assert_eq!(named, slash);
    assert_eq!(iso_date(&named), iso_date(&slash));
}

// ============================================================
// Form 3: generic fallback
// ============================================================

#[test]
fn iso_date_only() {
    assert_eq!(iso("2024-02-29").as_deref(), Some("2024-02-29"));
}

#[test]
fn iso_datetime_without_offset_is_utc() {
    let dt = parse_date("2023-10-17 14:05:00").unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2023, 10, 17, 14, 5, 0).unwrap());
}

#[test]
fn rfc3339_offset_is_converted_to_utc() {
    // 01:30 at +02:00 is the previous day in UTC
    assert_eq!(
        iso("2024-03-01T01:30:00+02:00").as_deref(),
        Some("2024-02-29")
    );
}

#[test]
fn us_style_month_first_with_name() {
    assert_eq!(iso("October 17, 2023").as_deref(), Some("2023-10-17"));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(iso("  17/10/2023 \t").as_deref(), Some("2023-10-17"));
}

// ============================================================
// Rejections and timezone policy
// ============================================================

#[test]
fn empty_and_whitespace_are_none() {
    assert!(parse_date("").is_none());
    assert!(parse_date("   ").is_none());
}

#[test]
fn garbage_is_none() {
    assert!(parse_date("sometime last spring").is_none());
    assert!(parse_date("32/01/2024").is_none());
}

#[test]
fn date_only_forms_are_utc_midnight() {
    let midnight = Utc.with_ymd_and_hms(2023, 10, 17, 0, 0, 0).unwrap();
    for raw in ["17 Oct 2023", "17/10/2023", "2023-10-17", "Oct 17, 2023"] {
        assert_eq!(parse_date(raw), Some(midnight), "input {raw:?}");
    }
}

#[test]
fn month_lookup_covers_all_months() {
    let names = [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ];
    for (i, name) in names.iter().enumerate() {
        assert_eq!(month_from_name(name), Some(i as u32 + 1));
        assert_eq!(month_from_name(&name[..3]), Some(i as u32 + 1));
    }
}
