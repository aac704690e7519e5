//! Data models for search conditions, history, and templates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// User context attached to a search session (e.g. the profile page the
/// search was started from)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Account handle, without the leading `@`
    pub username: String,
    /// Display name; defaults to the username when not provided
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl UserContext {
    /// Create a user context, defaulting the display name to the username
    #[must_use]
    pub fn new(username: impl Into<String>, display_name: Option<String>) -> Self {
        let username = username.into();
        let display_name = display_name.unwrap_or_else(|| username.clone());
        Self {
            username,
            display_name,
        }
    }
}

/// A persisted snapshot of a previously built query
///
/// History entries are deduplicated by their resolved `query` string; the
/// field names match the flat JSON layout used by the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique, time-derived identifier
    pub id: String,
    /// Human label, or the auto-generated description when none was given
    pub name: String,
    /// The resolved query string at save time
    pub query: String,
    /// Snapshot of the condition sequence at save time
    pub conditions: Vec<String>,
    /// When the entry was saved
    pub timestamp: DateTime<Utc>,
    /// Username context, if the search was scoped to a user session
    pub user: Option<String>,
}

/// A named, fixed preset condition list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Stable identifier used by `apply_template`
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Conditions the template expands to
    pub conditions: Vec<String>,
}

/// Kind of a search suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionKind {
    #[serde(rename = "hashtag")]
    Hashtag,
    #[serde(rename = "mention")]
    Mention,
    #[serde(rename = "cashtag")]
    Cashtag,
    #[serde(rename = "keyword")]
    Keyword,
}

/// A single search suggestion offered for a partial input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggestion category
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// The literal text to insert
    pub text: String,
    /// Short description shown next to the suggestion
    pub description: String,
}

/// Outcome of validating the current condition sequence
///
/// Errors accumulate; validation never short-circuits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Logical operator applied between multiple keywords
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordOperator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// Options for `add_keywords`; absent options are no-ops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordOptions {
    /// Wrap the keywords in double quotes (exact phrase)
    pub exact: bool,
    /// Negate the term with a leading `-`
    pub exclude: bool,
    /// Operator between words; `Or` rewrites spaces into ` OR `
    pub operator: KeywordOperator,
    /// Wildcard matching; only meaningful together with `exact`
    pub wildcard: bool,
    /// Prefix with `+` to suppress spelling correction
    pub force_original: bool,
}

/// How a username scopes the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserConditionType {
    /// Tweets authored by the user (`from:`)
    From,
    /// Replies to the user (`to:`)
    To,
    /// Tweets mentioning the user (`@`)
    Mention,
}

impl UserConditionType {
    /// Parse the wire spelling of a user condition type
    ///
    /// # Errors
    /// Returns `SearchError::InvalidUserConditionType` for anything other
    /// than `from`, `to`, or `@`
    pub fn parse(value: &str) -> Result<Self, SearchError> {
        match value {
            "from" => Ok(Self::From),
            "to" => Ok(Self::To),
            "@" => Ok(Self::Mention),
            other => Err(SearchError::InvalidUserConditionType {
                value: other.to_string(),
            }),
        }
    }
}

/// Engagement metric used by `min_<metric>:` operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementType {
    Retweets,
    Faves,
    /// Alias for `Faves`; normalised to `faves` when serialized
    Likes,
    Replies,
}

impl EngagementType {
    /// Parse the wire spelling of an engagement metric
    ///
    /// # Errors
    /// Returns `SearchError::InvalidEngagementType` for unknown metrics
    pub fn parse(value: &str) -> Result<Self, SearchError> {
        match value {
            "retweets" => Ok(Self::Retweets),
            "faves" => Ok(Self::Faves),
            "likes" => Ok(Self::Likes),
            "replies" => Ok(Self::Replies),
            other => Err(SearchError::InvalidEngagementType {
                value: other.to_string(),
            }),
        }
    }

    /// The metric name as it appears in the query grammar
    ///
    /// `likes` and `faves` are the same metric on the wire.
    #[must_use]
    pub fn as_metric(&self) -> &'static str {
        match self {
            Self::Retweets => "retweets",
            Self::Faves | Self::Likes => "faves",
            Self::Replies => "replies",
        }
    }
}

/// Emoji / sentiment token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiKind {
    /// Positive sentiment, `:)`
    Positive,
    /// Negative sentiment, `:(`
    Negative,
    /// Question, `?`
    Question,
    /// Escape hatch: the token is appended verbatim
    Raw(String),
}

impl EmojiKind {
    /// Map user input onto a known sentiment token, falling back to `Raw`
    #[must_use]
    pub fn from_input(value: &str) -> Self {
        match value {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "question" => Self::Question,
            other => Self::Raw(other.to_string()),
        }
    }

    /// The token as it appears in the query grammar
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::Positive => ":)",
            Self::Negative => ":(",
            Self::Question => "?",
            Self::Raw(raw) => raw,
        }
    }
}

/// Time-range options; each present key yields one condition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRangeOptions {
    /// Start date, `YYYY-MM-DD`
    pub since: Option<String>,
    /// End date, `YYYY-MM-DD`
    pub until: Option<String>,
    /// Start as a unix timestamp (`since_time:`)
    pub since_time: Option<String>,
    /// End as a unix timestamp (`until_time:`)
    pub until_time: Option<String>,
    /// Lowest tweet id (`since_id:`)
    pub since_id: Option<String>,
    /// Highest tweet id (`max_id:`)
    pub max_id: Option<String>,
    /// Relative window such as `2d`, `3h`, `30s` (`within_time:`)
    pub within_time: Option<String>,
    /// Precise start, `YYYY-MM-DD_HH:MM:SS_TZ`; aliased onto `since:`
    pub since_date_time: Option<String>,
    /// Precise end, `YYYY-MM-DD_HH:MM:SS_TZ`; aliased onto `until:`
    pub until_date_time: Option<String>,
}

/// Geo options; each present key yields one condition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationOptions {
    /// City name; quoted when it contains a space
    pub city: Option<String>,
    /// Near a place, or the literal `me`
    pub near: Option<String>,
    /// Radius, e.g. `15mi`
    pub within: Option<String>,
    /// `lat,long,radius` triple
    pub geocode: Option<String>,
    /// Place identifier (`place:`)
    pub place_id: Option<String>,
}

/// Tweet-type / card / source options; each present key yields one condition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetTypeOptions {
    /// Conversation thread id
    pub conversation_id: Option<String>,
    /// Quoted tweet id
    pub quoted_tweet_id: Option<String>,
    /// Quoted user id
    pub quoted_user_id: Option<String>,
    /// Card type name
    pub card_name: Option<String>,
    /// Card domain
    pub card_domain: Option<String>,
    /// Publishing client; quoted when it contains a space
    pub source: Option<String>,
}

/// A supported language code and its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
}

/// A supported card type and its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardTypeInfo {
    #[serde(rename = "type")]
    pub card_type: &'static str,
    pub name: &'static str,
}
