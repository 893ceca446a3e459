// Utility helpers for lenient number/date parsing and display formatting.
//
// Sheet cells are hand-edited, so everything here returns `Option` and lets
// the caller decide what "no value" means (0 km, skipped cell, ...).
use chrono::{Duration, NaiveDate};
use num_format::{Locale, ToFormattedString};

/// Parse the leading integer of a cell, ignoring whatever follows it.
///
/// - Leading whitespace is skipped.
/// - An optional `+`/`-` sign is accepted.
/// - Parsing stops at the first non-digit, so `"1200 km"` is `1200` and
///   `"12.9"` is `12`.
/// - Returns `None` when there are no digits at all.
/// - Values beyond `i64` saturate instead of failing.
pub fn parse_int_lenient(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        let d = (b - b'0') as i64;
        value = value.saturating_mul(10).saturating_add(d);
    }
    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Build a calendar date from possibly out-of-range components.
///
/// Month and day overflow roll forward (and underflow rolls back), so
/// `(2024, 2, 30)` is 1 March 2024 and `(2024, 13, 1)` is 1 January 2025.
pub fn date_with_rollover(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let y = i32::try_from(months.div_euclid(12)).ok()?;
    let m = months.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    first.checked_add_signed(Duration::try_days(day - 1)?)
}

/// Parse a `dd/mm/yyyy` cell. Anything that does not split into exactly
/// three numeric parts is rejected. Two-digit years (0-99) are read as
/// 1900-1999, the way spreadsheet date cells are interpreted.
pub fn parse_dmy_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let day = parse_int_lenient(parts[0])?;
    let month = parse_int_lenient(parts[1])?;
    let year = match parse_int_lenient(parts[2])? {
        y @ 0..=99 => 1900 + y,
        y => y,
    };
    date_with_rollover(year, month, day)
}

/// Whole days from `from` to `to`; negative when `to` is in the past.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Case-insensitive substring test. An empty needle always matches.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Kilometre figures with thousands separators (`50.000`), the way the
/// workshop reads them.
pub fn format_km(n: i64) -> String {
    n.to_formatted_string(&Locale::es)
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
