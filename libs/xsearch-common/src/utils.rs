//! Utility functions shared across the xsearch workspace

use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

use crate::constants::{QUERY_DATE_FORMAT, STORAGE_DIR, STORAGE_FILENAME, TIMESTAMP_FORMAT};

/// Get the default path of the history store file
#[must_use]
pub fn get_default_storage_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
    PathBuf::from(format!(
        "{home}/.local/share/{STORAGE_DIR}/{STORAGE_FILENAME}"
    ))
}

/// Format a timestamp the way history entries store it
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a query date string in YYYY-MM-DD format
///
/// # Errors
/// Returns `chrono::ParseError` if the date string is not in the expected format
pub fn parse_query_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, QUERY_DATE_FORMAT)
}

/// Truncate a string to a maximum byte length, appending an ellipsis
///
/// The cut never splits a multibyte character; the result may be a few
/// bytes shorter than `max_len`.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_get_default_storage_path() {
        let path = get_default_storage_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.contains(".local/share"));
        assert!(path_str.ends_with("history.json"));
        assert!(path_str.starts_with('/') || path_str.starts_with('~'));
    }

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let formatted = format_timestamp(&dt);
        assert_eq!(formatted, "2024-01-15T09:30:00.000Z");
    }

    #[test]
    fn test_parse_query_date() {
        assert!(parse_query_date("2024-01-15").is_ok());
        assert!(parse_query_date("2024-13-45").is_err());
        assert!(parse_query_date("not a date").is_err());
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello world", 5), "he...");
        assert_eq!(truncate_string("hi", 10), "hi");
        assert_eq!(truncate_string("test", 2), "...");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        // Byte 77 falls inside a 4-byte rocket; the cut backs up to 76
        let rockets = "🚀".repeat(30);
        assert_eq!(truncate_string(&rockets, 80), format!("{}...", "🚀".repeat(19)));
        assert_eq!(truncate_string("日本語のテスト", 10), "日本...");
    }
}
