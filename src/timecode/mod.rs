//! `MM:SS.ff` time codes used to order timeline entries.
//!
//! The stored text is always the source of truth. Parsing only produces an
//! ordering key and never rewrites what the user typed.

use std::cmp::Ordering;

pub const DEFAULT_TIME_TEXT: &str = "00:00.00";

/// Raw time text of a timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeCode(String);

impl TimeCode {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ordering key in seconds; `NaN` when the text is malformed.
    pub fn seconds(&self) -> f64 {
        parse_seconds(&self.0)
    }

    pub fn is_well_formed(&self) -> bool {
        !self.seconds().is_nan()
    }
}

impl Default for TimeCode {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_TEXT)
    }
}

impl From<&str> for TimeCode {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TimeCode {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl std::fmt::Display for TimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts `MM:SS.ff` into seconds.
///
/// `ff` counts hundredths, so `"00:01.5"` is 1.05 seconds while `"00:01.50"`
/// is 1.5 seconds. A missing or empty fraction counts as zero. Every segment
/// is read as its leading integer (`"07abc"` reads as 7, `"0x1A"` as hex 26);
/// a segment without leading digits, or text without a `:`, yields `NaN`.
pub fn parse_seconds(text: &str) -> f64 {
    let mut parts = text.split(':');
    let minutes = parts.next().and_then(leading_integer);
    let Some(rest) = parts.next() else {
        return f64::NAN;
    };

    let mut sub = rest.split('.');
    let seconds = sub.next().and_then(leading_integer);
    let hundredths = match sub.next() {
        None | Some("") => Some(0.0),
        Some(fraction) => leading_integer(fraction),
    };

    match (minutes, seconds, hundredths) {
        (Some(minutes), Some(seconds), Some(hundredths)) => {
            minutes * 60.0 + seconds + hundredths / 100.0
        }
        _ => f64::NAN,
    }
}

fn leading_integer(segment: &str) -> Option<f64> {
    let trimmed = segment.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (digits, radix) = match unsigned.get(..2) {
        Some("0x" | "0X") => (&unsigned[2..], 16),
        _ => (unsigned, 10),
    };
    let digit_len = digits
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digit_len == 0 {
        return None;
    }
    let value = match radix {
        10 => digits[..digit_len].parse::<f64>().ok()?,
        _ => digits[..digit_len]
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit)),
    };
    Some(if negative { -value } else { value })
}

/// Total order over parsed keys. Malformed (`NaN`) keys sort after every
/// valid key and compare equal to each other, so a stable sort keeps their
/// insertion order.
pub fn compare_seconds(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

pub fn compare(a: &TimeCode, b: &TimeCode) -> Ordering {
    compare_seconds(a.seconds(), b.seconds())
}

/// Renders seconds as `MM:SS.ff`, rounding to the nearest hundredth.
pub fn format_seconds(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let total = (seconds * 100.0).round() as u64;
    let minutes = total / 6000;
    let whole_seconds = (total / 100) % 60;
    let hundredths = total % 100;
    Some(format!("{minutes:02}:{whole_seconds:02}.{hundredths:02}"))
}
