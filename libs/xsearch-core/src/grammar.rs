//! Static tables for the search-query grammar
//!
//! The target grammar is a conjunction of space-separated terms. This module
//! holds the fixed operator vocabularies (languages, filters, includes, card
//! types) and the ordered dispatch table used to describe a condition back to
//! a human.

use crate::models::{CardTypeInfo, LanguageInfo};

/// Language codes accepted by `lang:`, including the special
/// linguistic-metadata codes (`und`, `qam`, `qct`, `qht`, `qme`, `qst`, `zxx`)
pub const SUPPORTED_LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo { code: "en", name: "English" },
    LanguageInfo { code: "zh", name: "Chinese" },
    LanguageInfo { code: "ja", name: "Japanese" },
    LanguageInfo { code: "ko", name: "Korean" },
    LanguageInfo { code: "es", name: "Spanish" },
    LanguageInfo { code: "fr", name: "French" },
    LanguageInfo { code: "de", name: "German" },
    LanguageInfo { code: "it", name: "Italian" },
    LanguageInfo { code: "pt", name: "Portuguese" },
    LanguageInfo { code: "ru", name: "Russian" },
    LanguageInfo { code: "ar", name: "Arabic" },
    LanguageInfo { code: "und", name: "Undefined language" },
    LanguageInfo { code: "qam", name: "Mentions only" },
    LanguageInfo { code: "qct", name: "Cashtags only" },
    LanguageInfo { code: "qht", name: "Hashtags only" },
    LanguageInfo { code: "qme", name: "Media links" },
    LanguageInfo { code: "qst", name: "Short text" },
    LanguageInfo { code: "zxx", name: "Media only, no text" },
];

/// Names accepted by `filter:` / `-filter:`
pub const VALID_FILTERS: &[&str] = &[
    "verified",
    "blue_verified",
    "follows",
    "social",
    "trusted",
    "replies",
    "links",
    "media",
    "images",
    "videos",
    "nativeretweets",
    "retweets",
    "quote",
    "self_threads",
    "has_engagement",
    "news",
    "safe",
    "hashtags",
];

/// Names accepted by `include:`
pub const VALID_INCLUDES: &[&str] = &["nativeretweets"];

/// Card types accepted by `card_name:`
pub const CARD_TYPES: &[CardTypeInfo] = &[
    CardTypeInfo { card_type: "poll2choice_text_only", name: "2-choice text poll" },
    CardTypeInfo { card_type: "poll3choice_image", name: "3-choice image poll" },
    CardTypeInfo { card_type: "poll4choice_text_only", name: "4-choice text poll" },
    CardTypeInfo { card_type: "audio", name: "Audio card" },
    CardTypeInfo { card_type: "animated_gif", name: "GIF card" },
    CardTypeInfo { card_type: "summary", name: "Small-image summary card" },
    CardTypeInfo { card_type: "summary_large_image", name: "Large-image summary card" },
    CardTypeInfo { card_type: "player", name: "Player card" },
    CardTypeInfo { card_type: "promo_image_app", name: "Promoted app image card" },
];

/// Whether a language code is a member of the supported set
#[must_use]
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|lang| lang.code == code)
}

/// Whether a filter name is a member of the recognised set
#[must_use]
pub fn is_valid_filter(name: &str) -> bool {
    VALID_FILTERS.contains(&name)
}

/// Whether an include name is a member of the recognised set
#[must_use]
pub fn is_valid_include(name: &str) -> bool {
    VALID_INCLUDES.contains(&name)
}

/// One prefix-dispatch rule for describing a condition
struct DescriptionRule {
    prefix: &'static str,
    label: &'static str,
    /// Strip the matched prefix from the value shown after the label;
    /// rules that keep it show the whole condition
    strip_prefix: bool,
}

/// Dispatch order is significant: first match wins
const DESCRIPTION_RULES: &[DescriptionRule] = &[
    DescriptionRule { prefix: "from:", label: "from user", strip_prefix: true },
    DescriptionRule { prefix: "to:", label: "replying to user", strip_prefix: true },
    DescriptionRule { prefix: "@", label: "mentions user", strip_prefix: true },
    DescriptionRule { prefix: "#", label: "hashtag", strip_prefix: false },
    DescriptionRule { prefix: "$", label: "cashtag", strip_prefix: false },
    DescriptionRule { prefix: "lang:", label: "language", strip_prefix: true },
    DescriptionRule { prefix: "since:", label: "start time", strip_prefix: true },
    DescriptionRule { prefix: "until:", label: "end time", strip_prefix: true },
    DescriptionRule { prefix: "filter:", label: "filter", strip_prefix: true },
    DescriptionRule { prefix: "min_", label: "minimum engagement", strip_prefix: false },
    DescriptionRule { prefix: "near:", label: "location", strip_prefix: true },
];

/// Describe one condition in human-readable form
#[must_use]
pub fn describe_condition(condition: &str) -> String {
    for rule in DESCRIPTION_RULES {
        if let Some(rest) = condition.strip_prefix(rule.prefix) {
            let value = if rule.strip_prefix { rest } else { condition };
            return format!("{}: {}", rule.label, value);
        }
    }

    if condition.starts_with('"') && condition.ends_with('"') {
        return format!("exact phrase: {condition}");
    }

    format!("keyword: {condition}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_membership() {
        assert!(is_supported_language("en"));
        assert!(is_supported_language("zxx"));
        assert!(!is_supported_language("xx"));
        assert!(!is_supported_language(""));
        assert_eq!(SUPPORTED_LANGUAGES.len(), 18);
    }

    #[test]
    fn test_filter_membership() {
        assert!(is_valid_filter("verified"));
        assert!(is_valid_filter("self_threads"));
        assert!(!is_valid_filter("not_a_real_filter"));
        assert_eq!(VALID_FILTERS.len(), 18);
    }

    #[test]
    fn test_include_membership() {
        assert!(is_valid_include("nativeretweets"));
        assert!(!is_valid_include("retweets"));
    }

    #[test]
    fn test_describe_user_conditions() {
        assert_eq!(describe_condition("from:alice"), "from user: alice");
        assert_eq!(describe_condition("to:bob"), "replying to user: bob");
        assert_eq!(describe_condition("@carol"), "mentions user: carol");
    }

    #[test]
    fn test_describe_tags_keep_sigil() {
        assert_eq!(describe_condition("#news"), "hashtag: #news");
        assert_eq!(describe_condition("$AAPL"), "cashtag: $AAPL");
    }

    #[test]
    fn test_describe_dispatch_order() {
        // `from:` must win over the `@` rule even if the value contains `@`
        assert_eq!(describe_condition("from:@alice"), "from user: @alice");
        // `since_time:` does not match the `since:` rule
        assert_eq!(
            describe_condition("since_time:1700000000"),
            "keyword: since_time:1700000000"
        );
    }

    #[test]
    fn test_describe_engagement_and_phrase() {
        assert_eq!(
            describe_condition("min_faves:100"),
            "minimum engagement: min_faves:100"
        );
        assert_eq!(
            describe_condition("\"exact phrase\""),
            "exact phrase: \"exact phrase\""
        );
        assert_eq!(describe_condition("rust"), "keyword: rust");
    }

    #[test]
    fn test_describe_location() {
        assert_eq!(describe_condition("near:me"), "location: me");
        assert_eq!(
            describe_condition("near:\"New York\""),
            "location: \"New York\""
        );
    }
}
