//! Per-field candidate tables and the extractors built on them.
//!
//! Each table lists key names or dotted paths in precedence order; they
//! encode the known ways providers name and nest the same fact. The first
//! candidate that resolves to a non-null value is selected *before*
//! coercion, so a present-but-unreadable value still claims the field.

use serde::Serialize;

use crate::coerce::{to_number, to_text};
use crate::format::{
    attribute_label, attribute_value, format_date, format_size, split_paragraphs,
};
use crate::record::Record;
use crate::resolve::resolve_path;

pub const PRICE_KEYS: &[&str] = &[
    "price",
    "listing_price",
    "sale_price",
    "median_price",
    "price.amount",
    "price.value",
    "pricing.price",
    "pricing.median",
    "metrics.price",
    "metrics.price.median",
    "attributes.price",
];

pub const ADDRESS_KEYS: &[&str] = &[
    "address.full",
    "address.formatted",
    "address.display",
    "displayAddress",
    "fullAddress",
    "location.address",
    "streetAddress",
    "street",
    "title",
    "name",
    "property_name",
    "address.street",
    "address",
    "area_name",
];

pub const BEDROOM_KEYS: &[&str] = &[
    "bedrooms",
    "beds",
    "bedroom",
    "attributes.bedrooms",
    "attributes.beds",
    "details.bedrooms",
    "metrics.bedrooms",
];

pub const BATHROOM_KEYS: &[&str] = &[
    "bathrooms",
    "baths",
    "bathroom",
    "attributes.bathrooms",
    "attributes.baths",
    "details.bathrooms",
    "metrics.bathrooms",
];

pub const GARAGE_KEYS: &[&str] = &[
    "attributes.garage_spaces",
    "garage_spaces",
    "car_spaces",
    "carports",
    "parking",
];

pub const LAND_SIZE_KEYS: &[&str] = &["attributes.land_size", "land_size", "lot_size"];

pub const BUILDING_SIZE_KEYS: &[&str] = &["attributes.building_size", "building_size"];

pub const PROPERTY_TYPE_KEYS: &[&str] = &["property_type", "attributes.property_type", "type"];

pub const LISTING_DATE_KEYS: &[&str] = &[
    "listing_date",
    "listed_at",
    "date",
    "attributes.listing_date",
];

pub const DESCRIPTION_KEYS: &[&str] = &["attributes.description", "description"];

pub const AREA_NAME_KEYS: &[&str] = &["area_name", "address.full", "address.display"];

pub const SUBURB_KEYS: &[&str] = &["address.sal", "suburb"];

pub const STATE_KEYS: &[&str] = &["address.state", "state"];

/// Mapping whose entries feed the residual attribute table.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Attribute key left out of the residual table (shown as the description).
const DESCRIPTION_ATTRIBUTE: &str = "description";

/// Raw value at the first candidate that resolves to something non-null.
pub fn extract_first(record: &Record, keys: &[&str]) -> Option<Record> {
    keys.iter()
        .find_map(|key| resolve_path(record, key).filter(|value| !value.is_null()))
}

fn first_number(record: &Record, keys: &[&str]) -> Option<f64> {
    extract_first(record, keys).and_then(|raw| to_number(&raw))
}

fn first_text(record: &Record, keys: &[&str]) -> Option<String> {
    extract_first(record, keys).and_then(|raw| to_text(&raw))
}

pub fn extract_price(record: &Record) -> Option<f64> {
    first_number(record, PRICE_KEYS)
}

pub fn extract_bedrooms(record: &Record) -> Option<f64> {
    first_number(record, BEDROOM_KEYS)
}

pub fn extract_bathrooms(record: &Record) -> Option<f64> {
    first_number(record, BATHROOM_KEYS)
}

pub fn extract_garage_spaces(record: &Record) -> Option<f64> {
    first_number(record, GARAGE_KEYS)
}

pub fn extract_address(record: &Record) -> Option<String> {
    first_text(record, ADDRESS_KEYS)
}

pub fn extract_area_name(record: &Record) -> Option<String> {
    first_text(record, AREA_NAME_KEYS)
}

pub fn extract_property_type(record: &Record) -> Option<String> {
    first_text(record, PROPERTY_TYPE_KEYS)
}

/// `"Suburb, STATE"` from whichever of the two parts are present.
pub fn extract_location(record: &Record) -> Option<String> {
    let parts: Vec<String> = [
        first_text(record, SUBURB_KEYS),
        first_text(record, STATE_KEYS),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

pub fn extract_land_size(record: &Record) -> Option<String> {
    extract_first(record, LAND_SIZE_KEYS).and_then(|raw| format_size(&raw))
}

pub fn extract_building_size(record: &Record) -> Option<String> {
    extract_first(record, BUILDING_SIZE_KEYS).and_then(|raw| format_size(&raw))
}

pub fn extract_listing_date(record: &Record) -> Option<String> {
    extract_first(record, LISTING_DATE_KEYS).and_then(|raw| format_date(&raw))
}

/// Description split into display paragraphs; empty when there is none.
pub fn extract_description(record: &Record) -> Vec<String> {
    first_text(record, DESCRIPTION_KEYS)
        .map(|text| split_paragraphs(&text))
        .unwrap_or_default()
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Both `coordinates.latitude` and `coordinates.longitude`, or nothing.
pub fn extract_coordinates(record: &Record) -> Option<Coordinates> {
    let latitude = resolve_path(record, "coordinates.latitude").and_then(|v| to_number(&v))?;
    let longitude = resolve_path(record, "coordinates.longitude").and_then(|v| to_number(&v))?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}

/// One row of the residual attribute table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Entries of the record's `attributes` mapping not shown elsewhere.
///
/// Skips the description, nulls, empty strings, and empty containers.
pub fn extra_attributes(record: &Record) -> Vec<Attribute> {
    let Some(attributes) = resolve_path(record, ATTRIBUTES_KEY) else {
        return Vec::new();
    };
    let Some(map) = attributes.as_mapping() else {
        return Vec::new();
    };

    let entries = map.entries();
    entries
        .iter()
        .filter(|(key, value)| {
            if key.to_lowercase() == DESCRIPTION_ATTRIBUTE {
                return false;
            }
            match value {
                Record::Null => false,
                Record::String(s) => !s.is_empty(),
                Record::Sequence(items) => !items.is_empty(),
                Record::Mapping(inner) => !inner.is_empty(),
                Record::Bool(_) | Record::Number(_) => true,
            }
        })
        .map(|(key, value)| Attribute {
            key: key.clone(),
            label: attribute_label(key),
            value: attribute_value(value),
        })
        .collect()
}

/// The handful of fields shown on a result card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingCard {
    pub address: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
}

impl ListingCard {
    pub fn from_record(record: &Record) -> Self {
        Self {
            address: extract_address(record),
            price: extract_price(record),
            bedrooms: extract_bedrooms(record),
            bathrooms: extract_bathrooms(record),
        }
    }
}

/// Every canonical field of one listing, ready for a detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingDetail {
    pub address: Option<String>,
    pub area_name: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub land_size: Option<String>,
    pub building_size: Option<String>,
    pub property_type: Option<String>,
    pub listing_date: Option<String>,
    pub description: Vec<String>,
    pub coordinates: Option<Coordinates>,
    pub extra_attributes: Vec<Attribute>,
}

impl ListingDetail {
    pub fn from_record(record: &Record) -> Self {
        Self {
            address: extract_address(record),
            area_name: extract_area_name(record),
            location: extract_location(record),
            price: extract_price(record),
            bedrooms: extract_bedrooms(record),
            bathrooms: extract_bathrooms(record),
            garage_spaces: extract_garage_spaces(record),
            land_size: extract_land_size(record),
            building_size: extract_building_size(record),
            property_type: extract_property_type(record),
            listing_date: extract_listing_date(record),
            description: extract_description(record),
            coordinates: extract_coordinates(record),
            extra_attributes: extra_attributes(record),
        }
    }
}
