//! Configuration loading and resolution.

/// Environment variable naming the default payload file.
pub const INPUT_ENV: &str = "PROPERTY_LENS_INPUT";

/// Environment variable overriding how many records a list shows.
pub const PAGE_SIZE_ENV: &str = "PROPERTY_LENS_PAGE_SIZE";

/// Input path meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Resolve the payload path: explicit flag, then env var, then stdin.
pub fn resolve_input_path(explicit: Option<&str>) -> String {
    if let Some(path) = explicit {
        return path.to_string();
    }

    if let Ok(env_path) = std::env::var(INPUT_ENV) {
        if !env_path.is_empty() {
            return env_path;
        }
    }

    STDIN_PATH.to_string()
}

/// Resolve the list page size: explicit flag, then env var, then the
/// engine default. Zero and unparseable values are ignored.
pub fn resolve_page_size(explicit: Option<usize>) -> usize {
    if let Some(size) = explicit.filter(|s| *s > 0) {
        return size;
    }

    match std::env::var(PAGE_SIZE_ENV) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(size) if size > 0 => size,
            _ => {
                tracing::warn!("Ignoring invalid {PAGE_SIZE_ENV}={raw:?}");
                property_lens::stats::DEFAULT_PAGE_SIZE
            }
        },
        Err(_) => property_lens::stats::DEFAULT_PAGE_SIZE,
    }
}
