//! Case-insensitive key lookup and dotted-path traversal.

use crate::record::Record;

/// Find the record's own key matching the earliest candidate.
///
/// Candidates are tried in order; for each, the record's keys are scanned in
/// enumeration order and the first one equal after case-folding wins. When
/// two keys differ only by case, the one enumerated first is returned.
pub fn resolve_key(record: &Record, candidates: &[&str]) -> Option<String> {
    let map = record.as_mapping()?;
    let entries = map.entries();
    candidates.iter().find_map(|candidate| {
        let folded = candidate.to_lowercase();
        entries
            .keys()
            .find(|key| key.to_lowercase() == folded)
            .cloned()
    })
}

/// Walk a dotted path (`"price.amount"`) one segment at a time.
///
/// Returns `None` as soon as a segment lands on a non-mapping or matches no
/// key. The returned value shares containers with the input.
pub fn resolve_path(record: &Record, path: &str) -> Option<Record> {
    let mut current = record.clone();
    for segment in path.split('.') {
        let map = current.as_mapping()?;
        let key = resolve_key(&current, &[segment])?;
        let next = map.get(&key)?;
        current = next;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from(value)
    }

    #[test]
    fn test_resolve_key_case_insensitive() {
        let r = record(json!({"Price": 1, "ADDRESS": "x"}));
        assert_eq!(resolve_key(&r, &["price"]).as_deref(), Some("Price"));
        assert_eq!(resolve_key(&r, &["Address"]).as_deref(), Some("ADDRESS"));
    }

    #[test]
    fn test_resolve_key_candidate_order_wins() {
        let r = record(json!({"beds": 2, "bedrooms": 3}));
        assert_eq!(
            resolve_key(&r, &["bedrooms", "beds"]).as_deref(),
            Some("bedrooms")
        );
    }

    #[test]
    fn test_resolve_key_case_tie_uses_enumeration_order() {
        let r = record(json!({"PRICE": 1, "price": 2}));
        assert_eq!(resolve_key(&r, &["Price"]).as_deref(), Some("PRICE"));
    }

    #[test]
    fn test_resolve_key_no_substring_match() {
        let r = record(json!({"listing_price": 1}));
        assert_eq!(resolve_key(&r, &["price"]), None);
    }

    #[test]
    fn test_resolve_key_non_mapping() {
        assert_eq!(resolve_key(&Record::from("price"), &["price"]), None);
        assert_eq!(resolve_key(&Record::Null, &["price"]), None);
        assert_eq!(
            resolve_key(&record(json!([{"price": 1}])), &["price"]),
            None
        );
    }

    #[test]
    fn test_resolve_path_nested() {
        let r = record(json!({"Metrics": {"PRICE": {"median": 650000}}}));
        let value = resolve_path(&r, "metrics.price.median").unwrap();
        assert_eq!(value.to_json_value().unwrap(), json!(650000));
    }

    #[test]
    fn test_resolve_path_short_circuits() {
        let r = record(json!({"price": 500, "address": {"street": "1 Main"}}));
        assert!(resolve_path(&r, "price.amount").is_none());
        assert!(resolve_path(&r, "address.suburb").is_none());
        assert!(resolve_path(&r, "missing.anything").is_none());
    }

    #[test]
    fn test_resolve_path_returns_null_values() {
        let r = record(json!({"price": null}));
        assert!(resolve_path(&r, "price").unwrap().is_null());
    }
}
