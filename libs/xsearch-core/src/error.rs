//! Error types for the xsearch core library

use thiserror::Error;

/// Result type alias for xsearch operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Main error type for xsearch operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid user condition type: {value}")]
    InvalidUserConditionType { value: String },

    #[error("Invalid filter type: {name}")]
    InvalidFilter { name: String },

    #[error("Invalid engagement type: {value}")]
    InvalidEngagementType { value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SearchError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error is a rejection of a structurally invalid argument
    /// (as opposed to an IO or serialization failure)
    #[must_use]
    pub fn is_validation_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidUserConditionType { .. }
                | Self::InvalidFilter { .. }
                | Self::InvalidEngagementType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_serialization_error_from_serde() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let search_error: SearchError = json_error.into();

        match search_error {
            SearchError::Serialization(_) => (),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_io_error_from_std() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let search_error: SearchError = io_error.into();

        match search_error {
            SearchError::Io(_) => (),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_invalid_filter_error() {
        let error = SearchError::InvalidFilter {
            name: "not_a_real_filter".to_string(),
        };

        assert!(error.to_string().contains("Invalid filter type"));
        assert!(error.to_string().contains("not_a_real_filter"));
        assert!(error.is_validation_rejection());
    }

    #[test]
    fn test_storage_error_helper() {
        let error = SearchError::storage("write failed");
        assert!(error.to_string().contains("Storage error"));
        assert!(error.to_string().contains("write failed"));
        assert!(!error.is_validation_rejection());
    }

    #[test]
    fn test_configuration_error_helper() {
        let error = SearchError::configuration("missing path");
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("missing path"));
    }
}
