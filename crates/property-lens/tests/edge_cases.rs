//! Edge case integration tests for property-lens.
//!
//! Covers adversarial record graphs (cycles, shared sub-objects, deep
//! nesting), whole-pipeline behaviour over realistic provider payloads, and
//! property checks over generated JSON.

use std::rc::Rc;

use proptest::prelude::*;
use serde_json::{json, Value};

use property_lens::fields::{extract_address, extract_price};
use property_lens::*;

// ─────────────────────── helpers ───────────────────────

fn record(value: Value) -> Record {
    Record::from(value)
}

/// A mapping that contains itself under `key`.
fn self_loop(key: &str) -> Rc<Mapping> {
    let map = Rc::new(Mapping::new());
    map.insert(key, Record::Mapping(Rc::clone(&map)));
    map
}

/// `levels` mappings where each level reaches the next through two keys.
/// Without identity tracking a walk would touch 2^levels paths.
fn diamond(levels: usize) -> Record {
    let mut current = Record::mapping([("label", Record::from("bottom"))]);
    for _ in 0..levels {
        current = Record::mapping([("left", current.clone()), ("right", current)]);
    }
    current
}

/// A chain of `depth` nested `{"next": ...}` mappings ending in `leaf`.
fn chain(depth: usize, leaf: Record) -> Record {
    let mut current = leaf;
    for _ in 0..depth {
        current = Record::mapping([("next", current)]);
    }
    current
}

// ═══════════════════════════════════════════════════════
// CYCLES AND SHARED STRUCTURE
// ═══════════════════════════════════════════════════════

#[test]
fn test_01_to_number_self_reference() {
    let map = self_loop("price");
    assert_eq!(to_number(&Record::Mapping(map)), None);
}

#[test]
fn test_02_to_number_mutual_reference() {
    let a = Rc::new(Mapping::new());
    let b = Rc::new(Mapping::new());
    a.insert("value", Record::Mapping(Rc::clone(&b)));
    b.insert("amount", Record::Mapping(Rc::clone(&a)));
    b.insert("note", Record::from("ask agent"));
    assert_eq!(to_number(&Record::Mapping(a)), None);
}

#[test]
fn test_03_to_number_cycle_with_reachable_number() {
    let map = self_loop("value");
    map.insert("fallback", Record::from("$410,000"));
    assert_eq!(to_number(&Record::Mapping(map)), Some(410_000.0));
}

#[test]
fn test_04_to_text_self_reference() {
    let map = self_loop("address");
    assert_eq!(to_text(&Record::Mapping(Rc::clone(&map))), None);
    map.insert("suburb", Record::from("Northcote"));
    assert_eq!(
        to_text(&Record::Mapping(map)).as_deref(),
        Some("Northcote")
    );
}

#[test]
fn test_05_normalize_self_reference() {
    let map = self_loop("data");
    map.insert("results", Record::Mapping(Rc::clone(&map)));
    assert!(normalize_list(&Record::Mapping(map)).is_empty());
}

#[test]
fn test_06_normalize_cycle_then_list() {
    let map = self_loop("raw");
    map.insert(
        "properties",
        record(json!([{"id": 7}])),
    );
    let list = normalize_list(&Record::Mapping(map));
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].to_json_value().unwrap(), json!({"id": 7}));
}

#[test]
fn test_07_diamond_is_explored_once() {
    // 2^64 paths; terminates only because each mapping is visited once.
    let graph = diamond(64);
    assert_eq!(to_number(&graph), None);
}

#[test]
fn test_08_extractors_on_cyclic_record() {
    let listing = Rc::new(Mapping::new());
    listing.insert("self", Record::Mapping(Rc::clone(&listing)));
    listing.insert("price", Record::Mapping(Rc::clone(&listing)));
    listing.insert("address", Record::Mapping(Rc::clone(&listing)));
    let listing = Record::Mapping(listing);

    assert_eq!(extract_price(&listing), None);
    assert_eq!(extract_address(&listing), None);
    let detail = ListingDetail::from_record(&listing);
    assert_eq!(detail.price, None);
    assert_eq!(detail_link(&listing), "/property");
}

// ═══════════════════════════════════════════════════════
// DEPTH
// ═══════════════════════════════════════════════════════

#[test]
fn test_09_to_number_deep_chain() {
    let deep = chain(200, Record::from("$1"));
    assert_eq!(to_number(&deep), Some(1.0));
}

#[test]
fn test_10_to_text_stops_at_depth_three() {
    assert_eq!(
        to_text(&chain(3, Record::from("ok"))).as_deref(),
        Some("ok")
    );
    assert_eq!(to_text(&chain(4, Record::from("hidden"))), None);
}

#[test]
fn test_11_normalize_long_envelope_chain() {
    let mut body = record(json!([{"id": "deep"}]));
    for _ in 0..500 {
        body = Record::mapping([("data", body)]);
    }
    assert_eq!(normalize_list(&body).len(), 1);
}

// ═══════════════════════════════════════════════════════
// PIPELINE
// ═══════════════════════════════════════════════════════

#[test]
fn test_12_mixed_provider_batch() {
    let body = r#"{
        "status": "ok",
        "data": {
            "results": [
                {"address": {"full": "1 High St, Kew"}, "price": "$1,500,000", "beds": 4},
                {"displayAddress": "2 Low Rd", "pricing": {"median": 900000}, "attributes": {"bedrooms": 3}},
                {"title": "3 Mid Ave", "price": "Contact agent"},
                {"name": "4 Top Pl", "metrics": {"price": {"median": "650000"}}}
            ]
        }
    }"#;
    let records = normalize_list(&Record::from_json_str(body).unwrap());
    assert_eq!(records.len(), 4);

    let addresses: Vec<Option<String>> = records.iter().map(extract_address).collect();
    assert_eq!(
        addresses,
        vec![
            Some("1 High St, Kew".to_string()),
            Some("2 Low Rd".to_string()),
            Some("3 Mid Ave".to_string()),
            Some("4 Top Pl".to_string()),
        ]
    );

    match summarize(&records) {
        BatchOutcome::Loaded(summary) => {
            assert_eq!(summary.count, 4);
            assert_eq!(summary.priced, 3);
            assert_eq!(summary.median_price, Some(900_000.0));
            assert_eq!(
                summary.average_price,
                Some((1_500_000.0 + 900_000.0 + 650_000.0) / 3.0)
            );
        }
        BatchOutcome::Empty => panic!("expected loaded batch"),
    }

    let sorted = sort_by_price(&records, SortDirection::Desc);
    let order: Vec<Option<f64>> = sorted.iter().map(extract_price).collect();
    assert_eq!(
        order,
        vec![Some(1_500_000.0), Some(900_000.0), Some(650_000.0), None]
    );
}

#[test]
fn test_13_empty_batch_is_distinct() {
    let records = normalize_list(&record(json!({"data": {"results": []}})));
    assert!(records.is_empty());
    assert_eq!(summarize(&records), BatchOutcome::Empty);

    let records = normalize_list(&record(json!({"error": "rate limited"})));
    assert_eq!(summarize(&records), BatchOutcome::Empty);
}

#[test]
fn test_14_records_are_not_mutated() {
    let original = json!([{"price": 3}, {"price": 1}, {"price": 2}]);
    let records = normalize_list(&record(original.clone()));
    let _ = sort_by_price(&records, SortDirection::Asc);
    let _ = summarize(&records);
    for r in &records {
        let _ = ListingDetail::from_record(r);
    }
    assert_eq!(
        Record::sequence(records).to_json_value().unwrap(),
        original
    );
}

#[test]
fn test_15_serialized_summary_shape() {
    let records = normalize_list(&record(json!([{"price": 100}, {"price": 200}])));
    let value = serde_json::to_value(summarize(&records)).unwrap();
    assert_eq!(
        value,
        json!({
            "status": "loaded",
            "count": 2,
            "priced": 2,
            "median_price": 150.0,
            "average_price": 150.0
        })
    );
    assert_eq!(
        serde_json::to_value(summarize(&[])).unwrap(),
        json!({"status": "empty"})
    );
}

#[test]
fn test_16_half_dollar_median_rounds_up() {
    let records = normalize_list(&record(json!([{"price": 100000}, {"price": 100001}])));
    let median = match summarize(&records) {
        BatchOutcome::Loaded(summary) => summary.median_price.unwrap(),
        BatchOutcome::Empty => panic!("expected a loaded batch"),
    };
    assert_eq!(median, 100_000.5);
    assert_eq!(format_currency(median), "$100,001");
}

#[test]
fn test_17_nan_samples_do_not_panic() {
    let samples: Vec<f64> = (0..64)
        .map(|i| if i % 5 == 0 { f64::NAN } else { 1_000.0 * i as f64 })
        .collect();
    let median = compute_median(&samples).unwrap();
    assert!(median.is_finite());
    assert!(compute_average(&samples).unwrap().is_finite());
}

// ═══════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e9f64..1.0e9).prop_map(|n| json!(n)),
        "[a-zA-Z0-9 $.,-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-zA-Z_]{1,8}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_resolve_key_never_invents(
        value in arb_json(),
        candidates in prop::collection::vec("[a-zA-Z_]{1,8}", 0..5),
    ) {
        let r = Record::from(value);
        let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
        if let Some(key) = resolve_key(&r, &refs) {
            let map = r.as_mapping().expect("only mappings have keys");
            prop_assert!(map.contains_key(&key));
            prop_assert!(refs.iter().any(|c| c.to_lowercase() == key.to_lowercase()));
        }
    }

    #[test]
    fn prop_to_number_idempotent(value in arb_json()) {
        if let Some(n) = to_number(&Record::from(value)) {
            prop_assert!(n.is_finite());
            prop_assert_eq!(to_number(&Record::Number(n)), Some(n));
        }
    }

    #[test]
    fn prop_coercion_total(value in arb_json()) {
        let r = Record::from(value);
        let _ = to_text(&r);
        let _ = format_size(&r);
        let _ = format_date(&r);
        let _ = ListingDetail::from_record(&r);
        let _ = normalize_list(&r);
    }

    #[test]
    fn prop_sort_keeps_missing_last(
        prices in prop::collection::vec(prop::option::of(-1_000_000i64..1_000_000), 0..20),
        descending in any::<bool>(),
    ) {
        let records: Vec<Record> = prices
            .iter()
            .map(|p| Record::mapping([("price", p.map_or(Record::Null, |n| Record::Number(n as f64)))]))
            .collect();
        let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
        let sorted: Vec<Option<f64>> = sort_by_price(&records, direction).iter().map(extract_price).collect();

        prop_assert_eq!(sorted.len(), prices.len());
        let first_missing = sorted.iter().position(Option::is_none).unwrap_or(sorted.len());
        prop_assert!(sorted[first_missing..].iter().all(Option::is_none));

        let present: Vec<f64> = sorted.iter().flatten().copied().collect();
        let ordered = present.windows(2).all(|w| if descending { w[0] >= w[1] } else { w[0] <= w[1] });
        prop_assert!(ordered);
        prop_assert_eq!(present.len(), prices.iter().flatten().count());
    }

    #[test]
    fn prop_median_within_range(samples in prop::collection::vec(-1.0e7f64..1.0e7, 1..30)) {
        let median = compute_median(&samples).unwrap();
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(median >= min && median <= max);
    }
}
