//! Normalisation of dates and court numbers as rendered by the docket site.
//!
//! # Known site defects
//!
//! - Filing dates normally arrive as `YYYY-MM-DD`, but some mirrors answer
//!   with `DD-MMM-YY` (e.g. `27-MAR-92`), apparently a localisation setting
//!   that flips under load. Both forms must map to the same ISO date.
//! - Related-case court numbers are sometimes rendered `YY-T-NNN` instead of
//!   the canonical `T-NNN-YY` (the year and type code swap places).

use chrono::NaiveDate;
use thiserror::Error;

/// Two-digit years below this value belong to the 2000s, the rest to the
/// 1900s, so `YY` covers 1950..=2049.
pub const CENTURY_PIVOT: i32 = 50;

/// Longest string treated as the abbreviated `DD-MMM-YY` date form.
const SHORT_DATE_MAX_LEN: usize = 9;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("unrecognised date {0:?}: expected YYYY-MM-DD or DD-MMM-YY")]
    Date(String),
}

/// Normalise a filing date to ISO 8601 (`YYYY-MM-DD`).
///
/// Input of at most 9 characters is read as `DD-MMM-YY` (month abbreviation
/// case-insensitive) and expanded with [`CENTURY_PIVOT`]. Longer input must
/// already be strict `YYYY-MM-DD` with a valid calendar date, which makes the
/// function idempotent.
///
/// ```
/// use docket_core::normalize_date;
/// assert_eq!(normalize_date("27-MAR-92").unwrap(), "1992-03-27");
/// assert_eq!(normalize_date("1992-03-27").unwrap(), "1992-03-27");
/// ```
pub fn normalize_date(raw: &str) -> Result<String, NormalizeError> {
    let s = raw.trim();
    if s.len() <= SHORT_DATE_MAX_LEN {
        return parse_short_date(s)
            .map(|d| d.to_string())
            .ok_or_else(|| NormalizeError::Date(raw.to_string()));
    }

    if !is_iso_shape(s) {
        return Err(NormalizeError::Date(raw.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.to_string())
        .map_err(|_| NormalizeError::Date(raw.to_string()))
}

/// `DDDD-DD-DD` byte shape. chrono alone also accepts a signed year and
/// space-padded fields.
fn is_iso_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, &c)| match i {
            4 | 7 => c == b'-',
            _ => c.is_ascii_digit(),
        })
}

fn parse_short_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if day.is_empty() || day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))? as u32
        + 1;
    let yy: i32 = year.parse().ok()?;
    let year = if yy < CENTURY_PIVOT { 2000 + yy } else { 1900 + yy };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalise a court number to canonical `{T|A}-NNN-YY` order.
///
/// Rewrites the swapped `YY-T-NNN` / `YY-A-NNN` rendering; anything else,
/// canonical or not, is returned unchanged. The whole string must match, so
/// any text around the pattern leaves it untouched.
///
/// ```
/// use docket_core::normalize_case_number;
/// assert_eq!(normalize_case_number("92-T-1"), "T-1-92");
/// assert_eq!(normalize_case_number("A-55-14"), "A-55-14");
/// ```
pub fn normalize_case_number(raw: &str) -> String {
    swapped_parts(raw)
        .map(|(year, kind, number)| format!("{kind}-{number}-{year}"))
        .unwrap_or_else(|| raw.to_string())
}

/// Split `YY-T-NNN` into `(YY, T, NNN)`.
fn swapped_parts(s: &str) -> Option<(&str, &str, &str)> {
    let mut parts = s.split('-');
    let (year, kind, number) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let two_digits = year.len() == 2 && year.bytes().all(|b| b.is_ascii_digit());
    let type_code = kind == "T" || kind == "A";
    let digits = !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());

    (two_digits && type_code && digits).then_some((year, kind, number))
}
