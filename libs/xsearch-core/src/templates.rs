//! Built-in search templates
//!
//! Templates are immutable named presets; applying one replaces the
//! builder's current condition sequence wholesale.

use once_cell::sync::Lazy;

use crate::models::Template;

static BUILTIN_TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        Template {
            id: "popular_tweets".to_string(),
            name: "Popular tweets".to_string(),
            description: "High-engagement tweets".to_string(),
            conditions: vec![
                "min_faves:100".to_string(),
                "min_retweets:50".to_string(),
                "-filter:replies".to_string(),
            ],
        },
        Template {
            id: "recent_media".to_string(),
            name: "Recent media".to_string(),
            description: "Images and videos from the last 24 hours".to_string(),
            conditions: vec!["filter:media".to_string(), "within_time:24h".to_string()],
        },
        Template {
            id: "verified_news".to_string(),
            name: "Verified news".to_string(),
            description: "News links from verified accounts".to_string(),
            conditions: vec![
                "filter:verified".to_string(),
                "filter:news".to_string(),
                "filter:links".to_string(),
            ],
        },
        Template {
            id: "user_threads".to_string(),
            name: "User threads".to_string(),
            description: "Self-threaded tweets".to_string(),
            conditions: vec!["filter:self_threads".to_string()],
        },
        Template {
            id: "trending_hashtags".to_string(),
            name: "Trending hashtags".to_string(),
            description: "Popular content carrying hashtags".to_string(),
            conditions: vec!["filter:hashtags".to_string(), "min_faves:50".to_string()],
        },
    ]
});

/// The fixed set of built-in templates
#[must_use]
pub fn builtin_templates() -> Vec<Template> {
    BUILTIN_TEMPLATES.clone()
}
