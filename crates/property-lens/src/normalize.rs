//! Envelope unwrapping: locate the list of records inside a response body.

use std::collections::{HashSet, VecDeque};

use crate::record::{MappingId, Record};

/// Keys that may hold the next layer of an envelope, in enqueue order.
pub const ENVELOPE_KEYS: [&str; 4] = ["raw", "data", "results", "properties"];

/// Find the first sequence reachable through envelope keys, breadth first.
///
/// Envelope keys are matched exactly. Each mapping is expanded at most once,
/// so cyclic envelopes terminate. Returns an empty list when nothing is
/// found; never fails.
pub fn normalize_list(raw: &Record) -> Vec<Record> {
    let mut queue = VecDeque::from([raw.clone()]);
    let mut visited = HashSet::new();

    while let Some(current) = queue.pop_front() {
        match &current {
            Record::Sequence(items) => return items.to_vec(),
            Record::Mapping(map) => {
                if !visited.insert(MappingId::of(map)) {
                    continue;
                }
                for key in ENVELOPE_KEYS {
                    if let Some(value) = map.get(key) {
                        queue.push_back(value);
                    }
                }
            }
            _ => {}
        }
    }

    tracing::debug!(
        "No record list found after unwrapping {} envelope(s)",
        visited.len()
    );
    Vec::new()
}
