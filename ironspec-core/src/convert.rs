/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! String to typed-value converters.
//!
//! Each function returns `None` when the raw value does not follow the wire
//! format of its type. [`FieldType::validate_format`](crate::types::FieldType::validate_format)
//! dispatches to these; callers needing the typed value use them directly.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Converts a single-character value.
#[must_use]
pub fn char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Converts a signed integer value: optional `-` followed by digits.
#[must_use]
pub fn int(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if !is_digits(digits) {
        return None;
    }
    value.parse().ok()
}

/// Converts an unsigned integer value (NumInGroup, SeqNum, Length).
#[must_use]
pub fn unsigned(value: &str) -> Option<u64> {
    if !is_digits(value) {
        return None;
    }
    value.parse().ok()
}

/// Converts a day of month (1-31).
#[must_use]
pub fn day_of_month(value: &str) -> Option<u8> {
    unsigned(value)
        .filter(|day| (1..=31).contains(day))
        .map(|day| day as u8)
}

/// Converts a decimal value: optional `-`, digits with at most one `.`.
///
/// Exponents and leading `+` are rejected.
#[must_use]
pub fn decimal(value: &str) -> Option<Decimal> {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit());
    if !all_digits || integer.len() + fraction.len() == 0 {
        return None;
    }
    Decimal::from_str(value).ok()
}

/// Converts a boolean value (`Y` or `N`).
#[must_use]
pub fn boolean(value: &str) -> Option<bool> {
    match value {
        "Y" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}

/// Converts a UTC timestamp: `YYYYMMDD-HH:MM:SS` with optional `.` and 1-9 fraction digits.
#[must_use]
pub fn utc_timestamp(value: &str) -> Option<NaiveDateTime> {
    if value.len() < 17 || !value.is_char_boundary(9) || value.as_bytes()[8] != b'-' {
        return None;
    }
    let date = utc_date(&value[..8])?;
    let time = utc_time_only(&value[9..])?;
    Some(date.and_time(time))
}

/// Converts a UTC time: `HH:MM:SS` with optional `.` and 1-9 fraction digits.
///
/// A seconds value of 60 is accepted as a leap second.
#[must_use]
pub fn utc_time_only(value: &str) -> Option<NaiveTime> {
    let bytes = value.as_bytes();
    if bytes.len() < 8 || !matches_pattern(&bytes[..8], b"DD:DD:DD") {
        return None;
    }
    let nanos = fraction_nanos(&bytes[8..])?;
    let hour = two_digits(&bytes[0..2]);
    let minute = two_digits(&bytes[3..5]);
    let second = two_digits(&bytes[6..8]);
    if second == 60 {
        NaiveTime::from_hms_nano_opt(hour, minute, 59, 1_000_000_000 + nanos)
    } else {
        NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
    }
}

/// Converts a date: `YYYYMMDD`.
#[must_use]
pub fn utc_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if !matches_pattern(bytes, b"DDDDDDDD") {
        return None;
    }
    let year = two_digits(&bytes[0..2]) * 100 + two_digits(&bytes[2..4]);
    NaiveDate::from_ymd_opt(
        year as i32,
        two_digits(&bytes[4..6]),
        two_digits(&bytes[6..8]),
    )
}

/// Checks a month-year value: `YYYYMM`, `YYYYMMDD` or `YYYYMMwN` (week 1-5).
#[must_use]
pub fn month_year(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 6 || !matches_pattern(&bytes[..6], b"DDDDDD") {
        return false;
    }
    if !(1..=12).contains(&two_digits(&bytes[4..6])) {
        return false;
    }
    match &bytes[6..] {
        [] => true,
        [b'w', week] => (b'1'..=b'5').contains(week),
        day @ [_, _] => matches_pattern(day, b"DD") && (1..=31).contains(&two_digits(day)),
        _ => false,
    }
}

#[inline]
fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Matches `value` against `pattern`, where `D` stands for any ASCII digit.
fn matches_pattern(value: &[u8], pattern: &[u8]) -> bool {
    value.len() == pattern.len()
        && value.iter().zip(pattern).all(|(v, p)| match p {
            b'D' => v.is_ascii_digit(),
            literal => v == literal,
        })
}

#[inline]
fn two_digits(bytes: &[u8]) -> u32 {
    u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0')
}

/// Parses an optional `.fffffffff` suffix into nanoseconds.
fn fraction_nanos(rest: &[u8]) -> Option<u32> {
    let Some(digits) = rest.strip_prefix(b".") else {
        return rest.is_empty().then_some(0);
    };
    if digits.is_empty() || digits.len() > 9 || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
    Some(value * 10u32.pow(9 - digits.len() as u32))
}
