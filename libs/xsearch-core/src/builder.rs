//! Query builder: accumulates typed search conditions and reduces them to a
//! query string or a human-readable description
//!
//! Conditions are stored as an ordered sequence of already-escaped grammar
//! fragments. Order is insertion order; the target grammar is a conjunction
//! of space-separated terms, so reordering would not change the matched
//! result set, but a single condition may carry internal OR-grouping and
//! must stay one atomic string.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::grammar::{
    self, describe_condition, CARD_TYPES, SUPPORTED_LANGUAGES,
};
use crate::models::{
    CardTypeInfo, EmojiKind, EngagementType, HistoryEntry, KeywordOperator, KeywordOptions,
    LanguageInfo, LocationOptions, Suggestion, Template, TimeRangeOptions, TweetTypeOptions,
    UserConditionType, UserContext, ValidationReport,
};
use crate::storage::{KvStore, MemoryStore};
use crate::suggest::suggestions_for;
use crate::templates::builtin_templates;

/// Sentinel returned by `describe` when no conditions are set
pub const NO_CONDITIONS_DESCRIPTION: &str = "no search conditions";

/// Accumulator of search conditions with fluent mutators
///
/// A builder is created fresh per search-authoring session and owns its
/// condition sequence and history cache exclusively. All mutators append at
/// most one condition; only `reset`, `apply_template`, and
/// `load_from_history` replace the whole sequence.
pub struct QueryBuilder {
    conditions: Vec<String>,
    current_user: Option<UserContext>,
    search_history: Vec<HistoryEntry>,
    templates: Vec<Template>,
    store: Arc<dyn KvStore>,
    config: SearchConfig,
    id_seq: u64,
}

impl std::fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("conditions", &self.conditions)
            .field("current_user", &self.current_user)
            .field("history_len", &self.search_history.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QueryBuilder {
    /// Create a builder with an empty history cache
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, config: SearchConfig) -> Self {
        Self {
            conditions: Vec::new(),
            current_user: None,
            search_history: Vec::new(),
            templates: builtin_templates(),
            store,
            config,
            id_seq: 0,
        }
    }

    /// Create a builder and load the persisted history
    ///
    /// Storage failures degrade to an empty history cache; they are logged
    /// and never surfaced to the caller.
    pub async fn load(store: Arc<dyn KvStore>, config: SearchConfig) -> Self {
        let mut builder = Self::new(store, config);
        builder.load_history_from_storage().await;
        builder
    }

    /// Create an ephemeral builder backed by an in-memory store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), SearchConfig::new("in-memory"))
    }

    /// Clear all conditions, leaving history and templates untouched
    pub fn reset(&mut self) -> &mut Self {
        self.conditions.clear();
        self
    }

    /// Set the user context for this session (used on user profile pages)
    pub fn set_current_user(
        &mut self,
        username: impl Into<String>,
        display_name: Option<String>,
    ) -> &mut Self {
        self.current_user = Some(UserContext::new(username, display_name));
        self
    }

    /// The current condition sequence, in insertion order
    #[must_use]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// The session user context, if any
    #[must_use]
    pub fn current_user(&self) -> Option<&UserContext> {
        self.current_user.as_ref()
    }

    // --- condition accumulators -------------------------------------------

    /// Add a keyword term
    ///
    /// Transforms apply to the trimmed input in this order: quoting for
    /// `exact`, else a `+` prefix for `force_original`; then a `-` prefix
    /// for `exclude`; then the OR rewrite when the operator is `Or`, the
    /// term still contains a space, and it is not exact. The OR rewrite
    /// splits on every single space of the already-transformed string, so a
    /// multi-word unit will be split along with everything else.
    pub fn add_keywords(&mut self, keywords: &str, options: KeywordOptions) -> &mut Self {
        let trimmed = keywords.trim();
        if trimmed.is_empty() {
            return self;
        }

        let mut condition = trimmed.to_string();

        // `wildcard` only matters together with `exact`; both spellings quote
        if options.exact {
            condition = format!("\"{condition}\"");
        } else if options.force_original {
            condition = format!("+{condition}");
        }

        if options.exclude {
            condition = format!("-{condition}");
        }

        if options.operator == KeywordOperator::Or && condition.contains(' ') && !options.exact {
            condition = condition.split(' ').collect::<Vec<_>>().join(" OR ");
        }

        self.conditions.push(condition);
        self
    }

    /// Scope the search to a user (`from:`, `to:`, or `@`)
    pub fn add_user_condition(
        &mut self,
        username: &str,
        condition_type: UserConditionType,
    ) -> &mut Self {
        if username.is_empty() {
            return self;
        }

        let condition = match condition_type {
            UserConditionType::From => format!("from:{username}"),
            UserConditionType::To => format!("to:{username}"),
            UserConditionType::Mention => format!("@{username}"),
        };

        self.conditions.push(condition);
        self
    }

    /// Scope the search to a list, by id or by `owner/slug` identifier
    ///
    /// Both spellings currently serialize identically; the flag is kept for
    /// interface compatibility with callers that pass it with intent.
    pub fn add_list(&mut self, list_identifier: &str, is_list_id: bool) -> &mut Self {
        if list_identifier.is_empty() {
            return self;
        }

        // Both spellings serialize identically today; the flag is reserved
        // for id-vs-slug differentiation and must not change behavior yet.
        let _ = is_list_id;
        self.conditions.push(format!("list:{list_identifier}"));
        self
    }

    /// Add a hashtag term, prepending `#` when missing
    pub fn add_hashtag(&mut self, hashtag: &str) -> &mut Self {
        if hashtag.is_empty() {
            return self;
        }

        let condition = if hashtag.starts_with('#') {
            hashtag.to_string()
        } else {
            format!("#{hashtag}")
        };
        self.conditions.push(condition);
        self
    }

    /// Add a cashtag term, prepending `$` when missing
    pub fn add_cashtag(&mut self, cashtag: &str) -> &mut Self {
        if cashtag.is_empty() {
            return self;
        }

        let condition = if cashtag.starts_with('$') {
            cashtag.to_string()
        } else {
            format!("${cashtag}")
        };
        self.conditions.push(condition);
        self
    }

    /// Add a `lang:` condition; unsupported codes are silently skipped
    pub fn add_language(&mut self, lang_code: &str) -> &mut Self {
        if grammar::is_supported_language(lang_code) {
            self.conditions.push(format!("lang:{lang_code}"));
        }
        self
    }

    /// Add a `url:` condition; the text is used verbatim
    pub fn add_url(&mut self, url_text: &str) -> &mut Self {
        if url_text.is_empty() {
            return self;
        }
        self.conditions.push(format!("url:{url_text}"));
        self
    }

    /// Add an emoji / sentiment token
    pub fn add_emoji(&mut self, kind: EmojiKind) -> &mut Self {
        let token = kind.as_token();
        if token.is_empty() {
            return self;
        }
        self.conditions.push(token.to_string());
        self
    }

    /// Add a `filter:` condition, negated when `exclude` is set
    ///
    /// # Errors
    /// Returns `SearchError::InvalidFilter` for names outside the
    /// recognised set
    pub fn add_filter(&mut self, filter_type: &str, exclude: bool) -> Result<&mut Self> {
        if filter_type.is_empty() {
            return Ok(self);
        }

        if !grammar::is_valid_filter(filter_type) {
            return Err(SearchError::InvalidFilter {
                name: filter_type.to_string(),
            });
        }

        let prefix = if exclude { "-" } else { "" };
        self.conditions.push(format!("{prefix}filter:{filter_type}"));
        Ok(self)
    }

    /// Add an `include:` condition; unrecognised names are silently skipped
    pub fn add_include(&mut self, include_type: &str) -> &mut Self {
        if grammar::is_valid_include(include_type) {
            self.conditions.push(format!("include:{include_type}"));
        }
        self
    }

    /// Add a `min_<metric>:` threshold, negated when `is_minimum` is false
    ///
    /// `Likes` is an alias and normalises to `faves` on the wire.
    pub fn add_engagement(
        &mut self,
        engagement: EngagementType,
        count: u64,
        is_minimum: bool,
    ) -> &mut Self {
        let prefix = if is_minimum { "" } else { "-" };
        let metric = engagement.as_metric();
        self.conditions.push(format!("{prefix}min_{metric}:{count}"));
        self
    }

    /// Add time-range conditions; each present option yields one condition
    ///
    /// `since_date_time` / `until_date_time` alias onto `since:` / `until:`.
    pub fn add_time_range(&mut self, options: &TimeRangeOptions) -> &mut Self {
        self.push_prefixed("since:", options.since.as_deref());
        self.push_prefixed("until:", options.until.as_deref());
        self.push_prefixed("since_time:", options.since_time.as_deref());
        self.push_prefixed("until_time:", options.until_time.as_deref());
        self.push_prefixed("since_id:", options.since_id.as_deref());
        self.push_prefixed("max_id:", options.max_id.as_deref());
        self.push_prefixed("within_time:", options.within_time.as_deref());
        self.push_prefixed("since:", options.since_date_time.as_deref());
        self.push_prefixed("until:", options.until_date_time.as_deref());
        self
    }

    /// Add geo conditions; each present option yields one condition
    pub fn add_location(&mut self, options: &LocationOptions) -> &mut Self {
        if let Some(city) = non_empty(options.city.as_deref()) {
            if city.contains(' ') {
                self.conditions.push(format!("near:\"{city}\""));
            } else {
                self.conditions.push(format!("near:{city}"));
            }
        }

        if let Some(near) = non_empty(options.near.as_deref()) {
            if near == "me" {
                self.conditions.push("near:me".to_string());
            } else {
                self.conditions.push(format!("near:{near}"));
            }
        }

        self.push_prefixed("within:", options.within.as_deref());
        self.push_prefixed("geocode:", options.geocode.as_deref());
        self.push_prefixed("place:", options.place_id.as_deref());
        self
    }

    /// Add tweet-type conditions; each present option yields one condition
    pub fn add_tweet_type(&mut self, options: &TweetTypeOptions) -> &mut Self {
        self.push_prefixed("conversation_id:", options.conversation_id.as_deref());
        self.push_prefixed("quoted_tweet_id:", options.quoted_tweet_id.as_deref());
        self.push_prefixed("quoted_user_id:", options.quoted_user_id.as_deref());
        self.push_prefixed("card_name:", options.card_name.as_deref());
        self.push_prefixed("card_domain:", options.card_domain.as_deref());

        if let Some(source) = non_empty(options.source.as_deref()) {
            let formatted = if source.contains(' ') {
                format!("\"{source}\"")
            } else {
                source.to_string()
            };
            self.conditions.push(format!("source:{formatted}"));
        }
        self
    }

    fn push_prefixed(&mut self, prefix: &str, value: Option<&str>) {
        if let Some(value) = non_empty(value) {
            self.conditions.push(format!("{prefix}{value}"));
        }
    }

    // --- reducers ---------------------------------------------------------

    /// Join the condition sequence into the final query string
    ///
    /// Pure and idempotent; returns the empty string when no conditions are
    /// set.
    #[must_use]
    pub fn build(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        self.conditions.join(" ")
    }

    /// Describe the condition sequence in human-readable form
    #[must_use]
    pub fn describe(&self) -> String {
        if self.conditions.is_empty() {
            return NO_CONDITIONS_DESCRIPTION.to_string();
        }

        self.conditions
            .iter()
            .map(|condition| describe_condition(condition))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check the condition sequence for over-constrained combinations
    ///
    /// All rules are checked independently; errors accumulate.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        let has_from = self.conditions.iter().any(|c| c.starts_with("from:"));
        let has_to = self.conditions.iter().any(|c| c.starts_with("to:"));
        let has_mention = self.conditions.iter().any(|c| c.starts_with('@'));

        if has_from && has_to && has_mention {
            errors.push("Too many user conditions; the search may return no results".to_string());
        }

        let since_count = self.count_prefix("since:");
        let until_count = self.count_prefix("until:");

        if since_count > 1 {
            errors.push("Only one start time can be set".to_string());
        }

        if until_count > 1 {
            errors.push("Only one end time can be set".to_string());
        }

        let near_count = self.count_prefix("near:");
        let geocode_count = self.count_prefix("geocode:");

        if near_count > 1 || geocode_count > 1 {
            errors.push("Only one location condition can be set".to_string());
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    fn count_prefix(&self, prefix: &str) -> usize {
        self.conditions
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    // --- templates & suggestions ------------------------------------------

    /// The fixed set of built-in templates
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Replace the condition sequence with a template's conditions
    ///
    /// Returns false (without touching state) when the id is unknown.
    pub fn apply_template(&mut self, template_id: &str) -> bool {
        match self.templates.iter().find(|t| t.id == template_id) {
            Some(template) => {
                self.conditions = template.conditions.clone();
                true
            }
            None => false,
        }
    }

    /// Static suggestions for a partial input
    #[must_use]
    pub fn suggestions(&self, current_input: &str) -> Vec<Suggestion> {
        suggestions_for(current_input)
    }

    /// The supported language codes with display names
    #[must_use]
    pub fn supported_languages(&self) -> &'static [LanguageInfo] {
        SUPPORTED_LANGUAGES
    }

    /// The supported card types with display names
    #[must_use]
    pub fn supported_card_types(&self) -> &'static [CardTypeInfo] {
        CARD_TYPES
    }

    // --- history ----------------------------------------------------------

    /// Snapshot the current query into history and persist it
    ///
    /// Returns the entry id, or `None` when the builder is empty. An entry
    /// with the same resolved query is replaced and moved to the front; the
    /// history is capped by evicting the oldest entries. Persistence
    /// failures are logged and the entry stays in the in-memory cache.
    pub async fn save_to_history(&mut self, name: Option<&str>) -> Option<String> {
        let query = self.build();
        if query.is_empty() {
            return None;
        }

        let id = self.next_history_id();
        let entry = HistoryEntry {
            id: id.clone(),
            name: name.map_or_else(|| self.describe(), str::to_string),
            query: query.clone(),
            conditions: self.conditions.clone(),
            timestamp: Utc::now(),
            user: self.current_user.as_ref().map(|u| u.username.clone()),
        };

        if let Some(existing) = self
            .search_history
            .iter()
            .position(|item| item.query == query)
        {
            self.search_history.remove(existing);
        }
        self.search_history.insert(0, entry);
        self.search_history.truncate(self.config.history_limit);

        self.persist_history().await;
        Some(id)
    }

    /// Replace the condition sequence with a history entry's snapshot
    pub fn load_from_history(&mut self, history_id: &str) -> bool {
        match self
            .search_history
            .iter()
            .find(|item| item.id == history_id)
        {
            Some(entry) => {
                self.conditions = entry.conditions.clone();
                true
            }
            None => false,
        }
    }

    /// The cached history, most recent first
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.search_history
    }

    /// Drop all history entries and persist the empty list
    pub async fn clear_history(&mut self) {
        self.search_history.clear();
        self.persist_history().await;
    }

    fn next_history_id(&mut self) -> String {
        // Wall-clock millis alone can collide within one burst of saves
        let id = format!("{}-{}", Utc::now().timestamp_millis(), self.id_seq);
        self.id_seq += 1;
        id
    }

    async fn persist_history(&self) {
        let value = match serde_json::to_value(&self.search_history) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to serialize search history");
                return;
            }
        };

        if let Err(e) = self.store.set(&self.config.storage_key, value).await {
            warn!(error = %e, "failed to persist search history; changes not saved");
        }
    }

    async fn load_history_from_storage(&mut self) {
        match self.store.get(&self.config.storage_key).await {
            Ok(Some(value)) => match serde_json::from_value::<Vec<HistoryEntry>>(value) {
                Ok(history) => {
                    debug!(entries = history.len(), "loaded search history");
                    self.search_history = history;
                }
                Err(e) => warn!(error = %e, "stored search history is malformed; ignoring"),
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to load search history"),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
