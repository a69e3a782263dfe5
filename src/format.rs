//! # Module: Display Formatting
//!
//! ## Responsibility
//! Pure value-to-string conversions shared by the KPI header, the inventory
//! table, the detail panel and chart tooltips.
//!
//! ## Guarantees
//! - Every function is total: absent or non-finite input renders a default
//! - No allocation beyond the returned `String`

use chrono::{DateTime, NaiveDateTime, Timelike};

/// Placeholder rendered for absent optional values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a currency amount as `$1234.50`.
///
/// Absent or non-finite values render as `$0.00`.
pub fn format_currency(value: f64) -> String {
    format!("${:.2}", finite_or_zero(value))
}

/// Formats a megabyte quantity with one decimal place.
pub fn format_mb(value: f64) -> String {
    format!("{:.1}", finite_or_zero(value))
}

/// Formats a number with thousands grouping.
///
/// Integral values render without decimals (`12,345`); fractional values keep
/// up to three decimals with trailing zeros removed (`1,234.5`).
///
/// # Examples
///
/// ```
/// use shadow_inventory::format::format_number;
/// assert_eq!(format_number(1234567.0), "1,234,567");
/// assert_eq!(format_number(0.25), "0.25");
/// ```
pub fn format_number(value: f64) -> String {
    let value = finite_or_zero(value);
    let negative = value < 0.0;
    let rendered = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    // "-0" is not a useful display value
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Formats an unsigned count with thousands grouping.
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats an ISO-8601 timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 (the wall-clock time of the given offset is kept) and
/// offset-less `T`- or space-separated forms. Absent or unparsable input
/// renders as [`NOT_AVAILABLE`].
pub fn format_date(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(parse_timestamp)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Formats a wall-clock time as `HH:MM:SS`.
pub fn format_clock<T: Timelike>(time: &T) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
