//! XSearch Core - Query construction for the X advanced-search grammar
//!
//! This library turns structured search intent (keywords, user scoping,
//! time ranges, geo filters, engagement thresholds, card and media filters)
//! into a single valid query string for the platform's search endpoint, and
//! can describe a built query back to a human in natural language.
//!
//! # Features
//!
//! - **Fluent condition accumulation**: one mutator per condition category,
//!   each appending at most one atomic grammar term
//! - **Reducers**: `build` (query string), `describe` (human summary), and
//!   `validate` (over-constrained combination warnings)
//! - **Templates**: fixed presets that seed or replace the condition list
//! - **Suggestions**: static completion hints keyed on the input's sigil
//! - **History**: deduplicated, capped search history persisted through an
//!   injected key-value store
//!
//! # Quick Start
//!
//! ```
//! use xsearch_core::{KeywordOptions, QueryBuilder, UserConditionType};
//!
//! let mut builder = QueryBuilder::in_memory();
//! builder
//!     .add_user_condition("alice", UserConditionType::From)
//!     .add_hashtag("news")
//!     .add_language("en");
//!
//! assert_eq!(builder.build(), "from:alice #news lang:en");
//! assert_eq!(
//!     builder.describe(),
//!     "from user: alice, hashtag: #news, language: en"
//! );
//! assert!(builder.validate().is_valid);
//! ```
//!
//! Persistent sessions inject a [`KvStore`] and load history at
//! construction:
//!
//! ```no_run
//! use std::sync::Arc;
//! use xsearch_core::{JsonFileStore, QueryBuilder, SearchConfig};
//!
//! # async fn example() {
//! let config = SearchConfig::from_env();
//! let store = Arc::new(JsonFileStore::new(&config.storage_path));
//! let mut builder = QueryBuilder::load(store, config).await;
//! builder.add_hashtag("rust");
//! builder.save_to_history(Some("rust firehose")).await;
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod grammar;
pub mod models;
pub mod storage;
pub mod suggest;
pub mod templates;

pub use builder::{QueryBuilder, NO_CONDITIONS_DESCRIPTION};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use grammar::{
    describe_condition, is_supported_language, is_valid_filter, is_valid_include, CARD_TYPES,
    SUPPORTED_LANGUAGES, VALID_FILTERS, VALID_INCLUDES,
};
pub use models::{
    CardTypeInfo, EmojiKind, EngagementType, HistoryEntry, KeywordOperator, KeywordOptions,
    LanguageInfo, LocationOptions, Suggestion, SuggestionKind, Template, TimeRangeOptions,
    TweetTypeOptions, UserConditionType, UserContext, ValidationReport,
};
pub use storage::{JsonFileStore, KvStore, MemoryStore};
pub use suggest::suggestions_for;
pub use templates::builtin_templates;

/// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
