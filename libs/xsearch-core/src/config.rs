//! Configuration for search history persistence

use std::path::{Path, PathBuf};

use xsearch_common::{get_default_storage_path, HISTORY_LIMIT, HISTORY_STORAGE_KEY};

use crate::error::Result;

/// Configuration for the builder's persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Path to the flat key-value store file
    pub storage_path: PathBuf,
    /// Key under which the history array is stored
    pub storage_key: String,
    /// Maximum number of history entries kept
    pub history_limit: usize,
}

impl SearchConfig {
    /// Create a configuration with a custom storage path
    #[must_use]
    pub fn new<P: AsRef<Path>>(storage_path: P) -> Self {
        Self {
            storage_path: storage_path.as_ref().to_path_buf(),
            storage_key: HISTORY_STORAGE_KEY.to_string(),
            history_limit: HISTORY_LIMIT,
        }
    }

    /// Create a configuration with the default storage path
    #[must_use]
    pub fn with_default_path() -> Self {
        Self::new(get_default_storage_path())
    }

    /// Create configuration from environment variables
    ///
    /// Reads `XSEARCH_STORAGE_PATH`; falls back to the default path
    #[must_use]
    pub fn from_env() -> Self {
        let storage_path = std::env::var("XSEARCH_STORAGE_PATH")
            .map_or_else(|_| get_default_storage_path(), PathBuf::from);
        Self::new(storage_path)
    }

    /// Create configuration for testing with a temporary store file
    ///
    /// # Errors
    /// Returns `SearchError::Io` if the temporary file cannot be created
    pub fn for_testing() -> Result<Self> {
        use tempfile::NamedTempFile;
        let temp_file = NamedTempFile::new()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self::new(path))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::with_default_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = SearchConfig::new("/tmp/history.json");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/history.json"));
        assert_eq!(config.storage_key, "xsearch_search_history");
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert!(config
            .storage_path
            .to_string_lossy()
            .ends_with("history.json"));
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_for_testing() {
        let config = SearchConfig::for_testing().unwrap();
        assert!(!config.storage_path.to_string_lossy().is_empty());
    }
}
