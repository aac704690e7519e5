//! XSearch Common - Shared utilities and constants for the xsearch workspace
//!
//! # Examples
//!
//! ```
//! use xsearch_common::{HISTORY_STORAGE_KEY, HISTORY_LIMIT, truncate_string};
//!
//! assert_eq!(HISTORY_STORAGE_KEY, "xsearch_search_history");
//! assert_eq!(HISTORY_LIMIT, 50);
//!
//! let truncated = truncate_string("hello world", 5);
//! assert_eq!(truncated, "he...");
//! ```

pub mod constants;
pub mod utils;

pub use constants::*;
pub use utils::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_re_exported_constants() {
        assert_eq!(HISTORY_STORAGE_KEY, "xsearch_search_history");
        assert_eq!(STORAGE_FILENAME, "history.json");
        assert_eq!(HISTORY_LIMIT, 50);
    }

    #[test]
    fn test_re_exported_functions() {
        let path = get_default_storage_path();
        assert!(!path.to_string_lossy().is_empty());

        assert_eq!(truncate_string("hello world", 5), "he...");
        assert!(parse_query_date("2024-06-01").is_ok());
    }
}
