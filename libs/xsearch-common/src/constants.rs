//! Constants shared across the xsearch workspace

/// Storage key under which the search history array is persisted
pub const HISTORY_STORAGE_KEY: &str = "xsearch_search_history";

/// Default file name of the flat key-value store
pub const STORAGE_FILENAME: &str = "history.json";

/// Directory name under the platform data dir
pub const STORAGE_DIR: &str = "xsearch";

/// Maximum number of history entries kept
pub const HISTORY_LIMIT: usize = 50;

/// Date format accepted by `since:` / `until:` operators
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used for history entry timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(HISTORY_STORAGE_KEY, "xsearch_search_history");
        assert_eq!(HISTORY_LIMIT, 50);
        assert_eq!(QUERY_DATE_FORMAT, "%Y-%m-%d");
    }
}
