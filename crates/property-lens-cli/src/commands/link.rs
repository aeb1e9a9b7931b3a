//! `property-lens link`: detail link carrying one record.

use anyhow::Result;
use property_lens::{detail_link, Record};

use super::record_at;

pub fn run(records: &[Record], index: usize) -> Result<String> {
    Ok(detail_link(record_at(records, index)?))
}
