//! Loose value coercions used by inference, filtering and aggregation.
//!
//! Dirty data never fails here: unparseable numbers and dates become NaN,
//! and callers decide whether NaN means "no match" or "zero".

use crate::types::Cell;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts without an offset, interpreted as UTC
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Calendar date layouts, interpreted as UTC midnight
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

/// Numeric value of a cell; `None` is a missing key.
///
/// Missing keys are NaN, nulls and blank strings are zero, booleans are 1/0.
pub fn to_number(cell: Option<&Cell>) -> f64 {
    match cell {
        None => f64::NAN,
        Some(Cell::Empty) => 0.0,
        Some(Cell::Boolean(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Cell::Number(n)) => *n,
        Some(Cell::Text(s)) => parse_number(s),
    }
}

/// Numeric value with NaN folded to zero, used when summing
pub fn to_number_or_zero(cell: Option<&Cell>) -> f64 {
    let n = to_number(cell);
    if n.is_nan() { 0.0 } else { n }
}

/// Parse a numeric literal the way loosely-typed form input is read:
/// surrounding whitespace ignored, empty is zero, `Infinity` and
/// `0x`/`0o`/`0b` prefixes accepted, anything else that is not a plain
/// decimal literal is NaN.
pub fn parse_number(s: &str) -> f64 {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    // Rust also accepts "inf"/"nan" spellings, which must stay NaN here
    let plain = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !plain {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
    .unwrap_or(f64::NAN)
}

/// Epoch milliseconds of a cell; `None` is a missing key.
///
/// Numbers are taken as epoch milliseconds already, nulls are the epoch,
/// missing keys and unparseable strings are NaN.
pub fn to_epoch_millis(cell: Option<&Cell>) -> f64 {
    match cell {
        None => f64::NAN,
        Some(Cell::Empty) => 0.0,
        Some(Cell::Boolean(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Cell::Number(n)) => {
            if n.is_finite() { n.trunc() } else { f64::NAN }
        }
        Some(Cell::Text(s)) => parse_date_millis(s),
    }
}

/// Parse a calendar date or timestamp into epoch milliseconds, NaN if invalid.
///
/// Offsets given in the text are honoured; values without one are UTC.
pub fn parse_date_millis(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return f64::NAN;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp_millis() as f64;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return dt.timestamp_millis() as f64;
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return dt.timestamp_millis() as f64;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return dt.and_utc().timestamp_millis() as f64;
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date_millis(date);
        }
    }

    // Year-month, e.g. "2024-03"
    if s.len() == 7 && s.as_bytes()[4] == b'-' {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return date_millis(date);
        }
    }

    f64::NAN
}

fn date_millis(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis() as f64)
        .unwrap_or(f64::NAN)
}

/// Whether a string parses as a calendar date
pub fn is_date(s: &str) -> bool {
    !parse_date_millis(s).is_nan()
}

/// String form of a cell used for text comparison.
///
/// Missing keys and nulls are the empty string.
pub fn to_label(cell: Option<&Cell>) -> String {
    match cell {
        None | Some(Cell::Empty) => String::new(),
        Some(cell) => to_category(Some(cell)),
    }
}

/// String form of a cell used as a category or group key.
///
/// Missing keys and nulls stay distinct from each other and from `""`.
pub fn to_category(cell: Option<&Cell>) -> String {
    match cell {
        None => "undefined".to_string(),
        Some(Cell::Empty) => "null".to_string(),
        Some(Cell::Text(s)) => s.clone(),
        Some(Cell::Number(n)) => format_number(*n),
        Some(Cell::Boolean(b)) => b.to_string(),
    }
}

/// Display a number the way it was most likely written.
///
/// Magnitudes from 1e21 up and below 1e-6 use exponent form, e.g. `1e+21`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // Covers negative zero
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    } else {
        format!("{n}")
    }
}

/// Minimum that propagates NaN from either side
pub fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

/// Maximum that propagates NaN from either side
pub fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}
