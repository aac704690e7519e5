//! Static search suggestions
//!
//! Suggestions are a fixed lookup keyed on the leading sigil of the current
//! input; this is deliberately not fuzzy search.

use crate::models::{Suggestion, SuggestionKind};

fn suggestion(kind: SuggestionKind, text: &str, description: &str) -> Suggestion {
    Suggestion {
        kind,
        text: text.to_string(),
        description: description.to_string(),
    }
}

/// Suggestions for the given partial input
#[must_use]
pub fn suggestions_for(current_input: &str) -> Vec<Suggestion> {
    if current_input.starts_with('#') {
        vec![
            suggestion(SuggestionKind::Hashtag, "#trending", "Trending topics"),
            suggestion(SuggestionKind::Hashtag, "#news", "News topics"),
            suggestion(SuggestionKind::Hashtag, "#tech", "Tech topics"),
        ]
    } else if current_input.starts_with('@') {
        vec![suggestion(
            SuggestionKind::Mention,
            "@username",
            "Mention a user",
        )]
    } else if current_input.starts_with('$') {
        vec![
            suggestion(SuggestionKind::Cashtag, "$AAPL", "Apple stock"),
            suggestion(SuggestionKind::Cashtag, "$TSLA", "Tesla stock"),
        ]
    } else {
        vec![
            suggestion(
                SuggestionKind::Keyword,
                "filter:verified",
                "Verified accounts only",
            ),
            suggestion(SuggestionKind::Keyword, "filter:media", "Contains media"),
            suggestion(SuggestionKind::Keyword, "min_faves:10", "At least 10 likes"),
            suggestion(SuggestionKind::Keyword, "lang:en", "English tweets"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashtag_suggestions() {
        let suggestions = suggestions_for("#ru");
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions
            .iter()
            .all(|s| s.kind == SuggestionKind::Hashtag));
        assert_eq!(suggestions[0].text, "#trending");
    }

    #[test]
    fn test_mention_suggestions() {
        let suggestions = suggestions_for("@al");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Mention);
    }

    #[test]
    fn test_cashtag_suggestions() {
        let suggestions = suggestions_for("$");
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].text, "$AAPL");
    }

    #[test]
    fn test_generic_suggestions() {
        let suggestions = suggestions_for("rust");
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions
            .iter()
            .all(|s| s.kind == SuggestionKind::Keyword));
    }

    #[test]
    fn test_empty_input_is_generic() {
        let suggestions = suggestions_for("");
        assert_eq!(suggestions.len(), 4);
    }
}
