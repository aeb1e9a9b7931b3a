//! Error types shared across the engine.
//!
//! Field resolution and coercion never fail: a value that cannot be read
//! degrades to `None`. Errors only surface at the edges, when external
//! JSON is parsed or when a record graph is serialized back out.

/// Errors that can occur in the listing engine.
#[derive(thiserror::Error, Debug)]
pub enum ListingError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid sort direction: {0} (expected \"asc\" or \"desc\")")]
    InvalidSortDirection(String),
}

/// Convenience result type.
pub type ListingResult<T> = Result<T, ListingError>;
