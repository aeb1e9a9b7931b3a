//! Command implementations for the `property-lens` binary.
//!
//! Each command takes already-normalized records and returns the text to
//! print, so the binary stays a thin dispatcher.

pub mod link;
pub mod list;
pub mod show;
pub mod summary;

use std::io::Read;

use anyhow::{Context, Result};
use property_lens::{normalize_list, Record};

use crate::config::STDIN_PATH;

/// Placeholder for a value that could not be resolved.
pub const MISSING: &str = "—";

/// Read a response body from a file (or stdin for `-`) and unwrap it into
/// a list of records.
pub fn load_records(path: &str) -> Result<Vec<Record>> {
    let text = if path == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
    };
    parse_records(&text).with_context(|| format!("Payload in {path} is not valid JSON"))
}

/// Parse a response body and unwrap it into a list of records.
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let body = Record::from_json_str(text)?;
    let records = normalize_list(&body);
    tracing::info!("Loaded {} record(s)", records.len());
    Ok(records)
}

/// Pick record `index` (zero-based) out of the batch.
pub fn record_at(records: &[Record], index: usize) -> Result<&Record> {
    records.get(index).with_context(|| {
        format!(
            "No record at index {index} (batch has {} record(s))",
            records.len()
        )
    })
}

fn or_missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING.to_string())
}
