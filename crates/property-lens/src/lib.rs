//! PropertyLens: schema-agnostic field resolution, coercion, and price statistics for property listings.

pub mod coerce;
pub mod fields;
pub mod format;
pub mod normalize;
pub mod record;
pub mod resolve;
pub mod selection;
pub mod stats;
pub mod types;

pub use coerce::{to_number, to_text};
pub use fields::{extract_first, Attribute, Coordinates, ListingCard, ListingDetail};
pub use format::{format_currency, format_date, format_number, format_size};
pub use normalize::normalize_list;
pub use record::{Mapping, MappingId, Record};
pub use resolve::{resolve_key, resolve_path};
pub use selection::{detail_link, load_selected, SelectionSources};
pub use stats::{
    compute_average, compute_median, sort_by_price, summarize, BatchOutcome, BatchSummary,
    SortDirection,
};
pub use types::*;
