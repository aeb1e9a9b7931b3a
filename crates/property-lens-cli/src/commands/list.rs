//! `property-lens list`: result cards, optionally sorted by price.

use anyhow::Result;
use property_lens::format::format_number;
use property_lens::stats::visible_page;
use property_lens::{format_currency, sort_by_price, ListingCard, Record, SortDirection};
use serde_json::json;

use super::MISSING;

/// Shown in place of an address the record does not provide.
const ADDRESS_FALLBACK: &str = "Property";

/// Render the first `limit` cards, sorted when `sort` is given.
pub fn run(
    records: &[Record],
    sort: Option<SortDirection>,
    limit: usize,
    json: bool,
) -> Result<String> {
    let ordered = match sort {
        Some(direction) => sort_by_price(records, direction),
        None => records.to_vec(),
    };
    let cards: Vec<ListingCard> = visible_page(&ordered, limit)
        .iter()
        .map(ListingCard::from_record)
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&json!({
            "total": records.len(),
            "shown": cards.len(),
            "cards": cards,
        }))?);
    }

    if cards.is_empty() {
        return Ok("No results found.".to_string());
    }

    let mut out = Vec::with_capacity(cards.len() + 1);
    for (i, card) in cards.iter().enumerate() {
        out.push(render_card(i + 1, card));
    }
    if records.len() > cards.len() {
        out.push(format!("… showing {} of {}", cards.len(), records.len()));
    }
    Ok(out.join("\n"))
}

fn render_card(position: usize, card: &ListingCard) -> String {
    let address = card.address.as_deref().unwrap_or(ADDRESS_FALLBACK);
    let price = card
        .price
        .map(format_currency)
        .unwrap_or_else(|| "Price unavailable".to_string());
    let beds = card.bedrooms.map(format_number);
    let baths = card.bathrooms.map(format_number);
    format!(
        "{position}. {address}\n   {price} · Beds: {} · Baths: {}",
        beds.as_deref().unwrap_or(MISSING),
        baths.as_deref().unwrap_or(MISSING),
    )
}
