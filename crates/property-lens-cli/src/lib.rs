//! PropertyLens CLI: summarize, sort, and inspect property listing payloads.

pub mod commands;
pub mod config;

pub use commands::{load_records, parse_records};
pub use config::{resolve_input_path, resolve_page_size};
