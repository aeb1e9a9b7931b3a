//! `property-lens show`: full detail view of one record.
//!
//! The record comes either from the loaded batch (`--index`) or from a
//! detail-link query string (`--data`), mirroring how a detail page picks up
//! the listing the user selected.

use anyhow::Result;
use property_lens::format::format_number;
use property_lens::{format_currency, load_selected, ListingDetail, Record, SelectionSources};

use super::{or_missing, record_at};

/// Shown when no record could be recovered.
pub const NOT_FOUND: &str = "Property not found";

/// Where the record to show comes from.
#[derive(Debug, Clone)]
pub enum Target<'a> {
    /// Zero-based position in the loaded batch.
    Index(usize),
    /// Query string of a detail link (`data=...`).
    Query(&'a str),
}

pub fn run(records: &[Record], target: Target<'_>, json: bool) -> Result<String> {
    let record = match target {
        Target::Index(index) => Some(record_at(records, index)?.clone()),
        Target::Query(query) => load_selected(&SelectionSources {
            query: Some(query.to_string()),
            ..Default::default()
        }),
    };

    let Some(record) = record else {
        return Ok(NOT_FOUND.to_string());
    };
    let detail = ListingDetail::from_record(&record);

    if json {
        return Ok(serde_json::to_string_pretty(&detail)?);
    }
    Ok(render_detail(&detail))
}

fn render_detail(detail: &ListingDetail) -> String {
    let mut lines = Vec::new();
    lines.push(
        detail
            .address
            .clone()
            .unwrap_or_else(|| "Property".to_string()),
    );
    if let Some(subtitle) = detail.area_name.clone().or_else(|| detail.location.clone()) {
        lines.push(subtitle);
    }
    lines.push(String::new());

    let metrics = [
        ("Price", detail.price.map(format_currency)),
        ("Bedrooms", detail.bedrooms.map(format_number)),
        ("Bathrooms", detail.bathrooms.map(format_number)),
        ("Garage Spaces", detail.garage_spaces.map(format_number)),
        ("Land Size", detail.land_size.clone()),
        ("Building Size", detail.building_size.clone()),
        ("Property Type", detail.property_type.clone()),
        ("Listing Date", detail.listing_date.clone()),
    ];
    for (label, value) in metrics {
        lines.push(format!("{label}: {}", or_missing(value)));
    }
    if let Some(coords) = detail.coordinates {
        lines.push(format!(
            "Coords: {}, {}",
            format_number(coords.latitude),
            format_number(coords.longitude)
        ));
    }

    lines.push(String::new());
    if detail.description.is_empty() {
        lines.push("Description unavailable.".to_string());
    } else {
        lines.push("Description".to_string());
        lines.extend(detail.description.iter().cloned());
    }

    if !detail.extra_attributes.is_empty() {
        lines.push(String::new());
        lines.push("Additional Attributes".to_string());
        for attr in &detail.extra_attributes {
            lines.push(format!("  {}: {}", attr.label, attr.value));
        }
    }

    lines.join("\n")
}
