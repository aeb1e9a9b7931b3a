//! Price statistics and ordering over a batch of records.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::fields::extract_price;
use crate::record::Record;
use crate::types::ListingError;

/// Number of records a list view shows at once.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Median of a sample set; mean of the two middle values for even counts.
/// NaN samples are ignored.
pub fn compute_median(numbers: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = numbers.iter().copied().filter(|n| !n.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean of a sample set. NaN samples are ignored.
pub fn compute_average(numbers: &[f64]) -> Option<f64> {
    let (sum, count) = numbers
        .iter()
        .filter(|n| !n.is_nan())
        .fold((0.0, 0usize), |(sum, count), n| (sum + n, count + 1));
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// Prices that coerced successfully. Unpriced records are left out rather
/// than counted as zero.
pub fn collect_prices(records: &[Record]) -> Vec<f64> {
    records.iter().filter_map(extract_price).collect()
}

/// Sort order for [`sort_by_price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ListingError::InvalidSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Return the records ordered by price, leaving the input untouched.
///
/// Unpriced records sort as `+inf` ascending and `-inf` descending, so they
/// land last either way. The sort is stable.
pub fn sort_by_price(records: &[Record], direction: SortDirection) -> Vec<Record> {
    let missing = match direction {
        SortDirection::Asc => f64::INFINITY,
        SortDirection::Desc => f64::NEG_INFINITY,
    };
    let mut keyed: Vec<(f64, Record)> = records
        .iter()
        .map(|record| (extract_price(record).unwrap_or(missing), record.clone()))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.total_cmp(b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// The records a list view shows first.
pub fn visible_page(records: &[Record], limit: usize) -> &[Record] {
    &records[..records.len().min(limit)]
}

/// Headline figures for a non-empty batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Records in the batch.
    pub count: usize,
    /// Records whose price coerced.
    pub priced: usize,
    pub median_price: Option<f64>,
    pub average_price: Option<f64>,
}

/// Result of summarizing a batch. An empty batch is its own outcome, distinct
/// from a batch whose records simply lack prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Empty,
    Loaded(BatchSummary),
}

/// Summarize a normalized batch.
pub fn summarize(records: &[Record]) -> BatchOutcome {
    if records.is_empty() {
        return BatchOutcome::Empty;
    }
    let prices = collect_prices(records);
    let summary = BatchSummary {
        count: records.len(),
        priced: prices.len(),
        median_price: compute_median(&prices),
        average_price: compute_average(&prices),
    };
    tracing::debug!(
        "Summarized {} record(s), {} priced",
        summary.count,
        summary.priced
    );
    BatchOutcome::Loaded(summary)
}
