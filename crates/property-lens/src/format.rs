//! Display formatting for extracted fields.
//!
//! Numbers use en-AU conventions: comma thousands separators, at most two
//! fraction digits for measurements, whole dollars for prices.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::coerce::{number_to_text, to_number, to_text};
use crate::record::Record;

/// Output layout for dates, e.g. `5 Mar 2024`.
const DATE_DISPLAY_FORMAT: &str = "%-d %b %Y";

/// Date-time layouts tried after RFC 3339 and RFC 2822.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts. `%B` also accepts abbreviated month names.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d-%B-%Y",
];

/// Format a number with thousands separators and up to two decimals,
/// rounding half away from zero.
pub fn format_number(n: f64) -> String {
    let fixed = format!("{:.2}", (n.abs() * 100.0).round() / 100.0);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = group_thousands(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    if n < 0.0 && out != "0" {
        out.insert(0, '-');
    }
    out
}

/// Format a price in whole dollars, e.g. `$1,250,000`. Cents round half
/// away from zero.
pub fn format_currency(n: f64) -> String {
    let whole = format!("{:.0}", n.abs().round());
    let grouped = group_thousands(&whole);
    if n < 0.0 && grouped != "0" {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a land or building size, sniffing the unit from string input.
///
/// `"2.5 ha"` stays in hectares, anything mentioning `acre` is shown in
/// acres, and everything else numeric is treated as square metres. Values
/// with no number in them fall back to their text form.
pub fn format_size(raw: &Record) -> Option<String> {
    match raw {
        Record::Null => return None,
        Record::String(s) if s.is_empty() => return None,
        _ => {}
    }

    let Some(n) = to_number(raw) else {
        return to_text(raw);
    };
    let lowered = raw.as_str().map(str::to_lowercase);
    let unit = match lowered.as_deref() {
        Some(s) if s.contains("ha") => "ha",
        Some(s) if s.contains("acre") => "acres",
        _ => "m²",
    };
    Some(format!("{} {unit}", format_number(n)))
}

/// Parse a listing date and render it as `D Mon YYYY` (UTC).
///
/// Numbers are epoch milliseconds. Empty strings and zero count as no date.
pub fn format_date(raw: &Record) -> Option<String> {
    let parsed = match raw {
        Record::Number(ms) if ms.is_finite() && *ms != 0.0 => {
            DateTime::from_timestamp_millis(*ms as i64)?.naive_utc()
        }
        Record::String(s) if !s.is_empty() => parse_date_text(s)?,
        _ => return None,
    };
    Some(parsed.format(DATE_DISPLAY_FORMAT).to_string())
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn paragraph_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("paragraph regex is valid"))
}

fn line_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").expect("line break regex is valid"))
}

fn label_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[_-]+").expect("label separator regex is valid"))
}

/// Split free text into paragraphs on blank lines; single line breaks
/// inside a paragraph become spaces.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    paragraph_break()
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| line_break().replace_all(segment, " ").into_owned())
        .collect()
}

/// Turn a raw attribute key into a heading: `land_size-sqm` → `Land Size Sqm`.
pub fn attribute_label(key: &str) -> String {
    let spaced = label_separator().replace_all(key, " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start && (c.is_ascii_alphanumeric() || c == '_') {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// Text shown for an attribute value: scalars as-is, containers as
/// indented JSON.
pub fn attribute_value(value: &Record) -> String {
    match value {
        Record::Null => "null".to_string(),
        Record::Bool(b) => b.to_string(),
        Record::Number(n) => number_to_text(*n),
        Record::String(s) => s.clone(),
        Record::Sequence(_) | Record::Mapping(_) => value
            .to_json_pretty()
            .unwrap_or_else(|_| "[circular]".to_string()),
    }
}
