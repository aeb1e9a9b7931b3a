//! Hand-off of a single selected record between views.
//!
//! A record travels either inside the detail URL (`?data=<json>`) or as JSON
//! text in a local or session storage slot. Anything that fails to parse is
//! logged and treated as "no record"; nothing here returns an error.

use std::borrow::Cow;

use url::form_urlencoded;

use crate::record::Record;

/// Path of the detail view.
pub const DETAIL_PATH: &str = "/property";

/// Query parameter carrying the serialized record.
pub const DATA_PARAM: &str = "data";

/// Storage key the list view writes the selected record under.
pub const SELECTED_KEY: &str = "selectedProperty";

/// Raw inputs a detail view can recover a record from.
#[derive(Debug, Clone, Default)]
pub struct SelectionSources {
    /// Query string of the detail URL, with or without the leading `?`.
    pub query: Option<String>,
    /// JSON text stored in the persistent slot.
    pub local: Option<String>,
    /// JSON text stored in the per-session slot.
    pub session: Option<String>,
}

/// Recover the selected record: query string first, then local, then
/// session. The first source that is present and parses wins.
pub fn load_selected(sources: &SelectionSources) -> Option<Record> {
    let from_query = sources
        .query
        .as_deref()
        .and_then(query_data)
        .and_then(|text| parse_from("query string", &text));

    from_query
        .or_else(|| {
            sources
                .local
                .as_deref()
                .and_then(|text| parse_from("local storage", text))
        })
        .or_else(|| {
            sources
                .session
                .as_deref()
                .and_then(|text| parse_from("session storage", text))
        })
        .filter(|record| !record.is_null())
}

/// Parse one stored JSON text, logging and discarding failures.
pub fn parse_selected(text: &str) -> Option<Record> {
    parse_from("input", text)
}

fn parse_from(source: &str, text: &str) -> Option<Record> {
    if text.is_empty() {
        return None;
    }
    match Record::from_json_str(text) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Unable to parse property data from {source}: {e}");
            None
        }
    }
}

/// Decoded value of the `data` parameter, if present and non-empty.
pub fn query_data(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(Cow::into_owned)
}

/// Link to the detail view carrying `record` in the query string.
///
/// Falls back to the bare detail path when the record cannot be serialized.
pub fn detail_link(record: &Record) -> String {
    match serde_json::to_string(record) {
        Ok(json) => {
            let encoded: String = form_urlencoded::byte_serialize(json.as_bytes()).collect();
            format!("{DETAIL_PATH}?{DATA_PARAM}={encoded}")
        }
        Err(e) => {
            tracing::warn!("Unable to encode property into detail link: {e}");
            DETAIL_PATH.to_string()
        }
    }
}
