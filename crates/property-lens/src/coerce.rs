//! Best-effort scalar extraction from arbitrarily nested values.
//!
//! Neither coercer ever fails: a value that cannot be read as the target
//! type yields `None`.

use std::collections::HashSet;

use crate::record::{MappingId, Record};
use crate::resolve::resolve_key;

/// Keys that usually hold the figure inside a price-like object.
/// Matched exactly, unlike field candidates.
pub const NUMBER_PRIORITY_KEYS: [&str; 6] = ["amount", "value", "price", "median", "average", "avg"];

/// Keys that usually hold a display string inside an address-like object.
pub const TEXT_PRIORITY_KEYS: [&str; 7] = [
    "full",
    "formatted",
    "display",
    "line1",
    "street",
    "address",
    "name",
];

/// Nesting levels `to_text` will look through.
pub const MAX_TEXT_DEPTH: usize = 3;

/// Coerce a value to a finite number.
pub fn to_number(value: &Record) -> Option<f64> {
    to_number_tracked(value, &mut HashSet::new())
}

/// Coerce a value to a finite number, sharing `visited` across the whole
/// recursion so each mapping is examined at most once.
pub fn to_number_tracked(value: &Record, visited: &mut HashSet<MappingId>) -> Option<f64> {
    match value {
        Record::Number(n) => n.is_finite().then_some(*n),
        Record::String(s) => parse_numeric(s),
        Record::Mapping(map) => {
            if !visited.insert(MappingId::of(map)) {
                return None;
            }
            for key in NUMBER_PRIORITY_KEYS {
                if let Some(nested) = map.get(key) {
                    if let Some(n) = to_number_tracked(&nested, visited) {
                        return Some(n);
                    }
                }
            }
            map.entries()
                .values()
                .find_map(|nested| to_number_tracked(nested, visited))
        }
        Record::Null | Record::Bool(_) | Record::Sequence(_) => None,
    }
}

/// Strip everything but digits, `.` and `-`, then parse what remains.
fn parse_numeric(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a value to display text.
pub fn to_text(value: &Record) -> Option<String> {
    to_text_at(value, 0)
}

/// Coerce a value to display text, starting at nesting level `depth`.
///
/// Mappings first try the earliest priority key present; failing that, the
/// text of every value is collected, de-duplicated in first-seen order and
/// joined with `", "`. Empty results from nested values count as missing.
pub fn to_text_at(value: &Record, depth: usize) -> Option<String> {
    match value {
        Record::String(s) => Some(s.clone()),
        Record::Number(n) => Some(number_to_text(*n)),
        Record::Mapping(map) if depth < MAX_TEXT_DEPTH => {
            if let Some(key) = resolve_key(value, &TEXT_PRIORITY_KEYS) {
                let resolved = map
                    .get(&key)
                    .and_then(|nested| to_text_at(&nested, depth + 1))
                    .filter(|s| !s.is_empty());
                if resolved.is_some() {
                    return resolved;
                }
            }

            let mut parts: Vec<String> = Vec::new();
            for nested in map.entries().values() {
                if let Some(part) = to_text_at(nested, depth + 1) {
                    if !part.is_empty() && !parts.contains(&part) {
                        parts.push(part);
                    }
                }
            }
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

/// Shortest decimal form of a number (`3`, `2.5`). Magnitudes of `1e21` and
/// above, or below `1e-6`, use exponent form (`1e+21`, `1.5e-7`).
pub fn number_to_text(n: f64) -> String {
    if n == 0.0 {
        // Covers -0.
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let scientific = format!("{n:e}");
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        };
    }
    format!("{n}")
}
