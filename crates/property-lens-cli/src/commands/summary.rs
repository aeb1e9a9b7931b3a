//! `property-lens summary`: headline price figures for a batch.

use anyhow::Result;
use property_lens::{format_currency, summarize, BatchOutcome, Record};

use super::MISSING;

/// Render the batch summary as text or JSON.
pub fn run(records: &[Record], json: bool) -> Result<String> {
    let outcome = summarize(records);
    if json {
        return Ok(serde_json::to_string_pretty(&outcome)?);
    }

    let summary = match outcome {
        BatchOutcome::Empty => return Ok("No results found.".to_string()),
        BatchOutcome::Loaded(summary) => summary,
    };

    let median = summary.median_price.map(format_currency);
    let average = summary.average_price.map(format_currency);
    let price_line = match (median, average) {
        (Some(median), Some(average)) => format!("{median} · Avg {average}"),
        (Some(median), None) => median,
        _ => MISSING.to_string(),
    };

    Ok([
        format!("Listings: {}", summary.count),
        format!("Priced: {}", summary.priced),
        format!("Median price: {price_line}"),
    ]
    .join("\n"))
}
