// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Suggestion request/response schema shared by both providers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Upper bound on suggestions accepted from a provider.
pub const MAX_SUGGESTIONS: usize = 10;

/// Maximum number of words allowed in `imageKeywords`.
pub const MAX_IMAGE_KEYWORDS: usize = 2;

/// Longest accepted location name, in characters.
pub const MAX_LOCATION_CHARS: usize = 200;

/// Which backend produces suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// Managed Gemini endpoint with schema-constrained output.
    #[default]
    #[serde(alias = "googleai")]
    Hosted,
    /// Ollama daemon reached over plain HTTP.
    #[serde(alias = "ollama")]
    Local,
}

impl AiProvider {
    pub const ALL: [AiProvider; 2] = [AiProvider::Hosted, AiProvider::Local];

    /// Human-readable provider name used in notifications and logs.
    pub fn label(self) -> &'static str {
        match self {
            AiProvider::Hosted => "Google AI",
            AiProvider::Local => "Local Ollama",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AiProvider::Hosted => "hosted",
            AiProvider::Local => "local",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood choices offered by the front-end.
pub const MOOD_OPTIONS: [&str; 6] = [
    "Happy",
    "Relaxed",
    "Adventurous",
    "Curious",
    "Energetic",
    "Educational",
];

/// Time choices as `(value, label)`. The value is what the prompt sees.
pub const TIME_OPTIONS: [(&str, &str); 5] = [
    ("30 minutes", "30 minutes"),
    ("1 hour", "1 hour"),
    ("2 hours", "2 hours"),
    ("Half-day", "Half-day (4h)"),
    ("Full-day", "Full-day (8h)"),
];

/// Category labels the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Outdoors,
    Arts,
    Relaxation,
    Adventure,
    Shopping,
    Sightseeing,
    Entertainment,
    Sports,
    Wellness,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Outdoors,
        Category::Arts,
        Category::Relaxation,
        Category::Adventure,
        Category::Shopping,
        Category::Sightseeing,
        Category::Entertainment,
        Category::Sports,
        Category::Wellness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Outdoors => "Outdoors",
            Category::Arts => "Arts",
            Category::Relaxation => "Relaxation",
            Category::Adventure => "Adventure",
            Category::Shopping => "Shopping",
            Category::Sightseeing => "Sightseeing",
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
            Category::Wellness => "Wellness",
        }
    }

    /// Comma-separated list for prompts and schema descriptions.
    pub fn joined_labels() -> String {
        Category::ALL
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// User inputs for one "find activities" action.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// General area name, e.g. "downtown San Francisco".
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub location_context: String,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub mood: String,
    #[validate(length(max = 100), custom(function = "not_blank"))]
    pub time_available: String,
    #[validate(length(max = 500))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(default)]
    pub ai_provider: AiProvider,
}

impl SuggestionRequest {
    /// Preferences with blank values treated as absent.
    pub fn preferences(&self) -> Option<&str> {
        self.preferences
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// One activity recommendation produced by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySuggestion {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(max = 100))]
    pub category: String,
    #[validate(length(max = 100))]
    pub estimated_duration: String,
    #[validate(length(max = 300))]
    pub location_hint: String,
    #[validate(custom(function = "at_most_two_words"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_keywords: Option<String>,
}

/// Normalized provider output. An empty list is a valid result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SuggestionResponse {
    #[validate(length(max = 10), nested)]
    pub suggestions: Vec<ActivitySuggestion>,
}

impl SuggestionResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Check an already-parsed JSON value against the response schema.
    ///
    /// Shape errors come from serde, constraint errors from `validator`.
    /// The returned string is the diagnostic for a schema violation.
    pub fn from_value(value: serde_json::Value) -> Result<Self, String> {
        let response: SuggestionResponse =
            serde_json::from_value(value).map_err(|e| format!("shape mismatch: {}", e))?;
        response
            .validate()
            .map_err(|e| format!("constraint violation: {}", e))?;
        Ok(response)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

fn at_most_two_words(value: &str) -> Result<(), ValidationError> {
    if value.split_whitespace().count() > MAX_IMAGE_KEYWORDS {
        return Err(ValidationError::new("too_many_keywords")
            .with_message(Cow::Borrowed("at most two keywords")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn suggestion(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "description": "A calm hour with a book.",
            "category": "Relaxation",
            "estimatedDuration": "45 minutes",
            "locationHint": "corner cafe"
        })
    }

    #[test]
    fn test_from_value_accepts_valid_payload() {
        let value = json!({ "suggestions": [suggestion("Quiet Reading Nook")] });
        let response = SuggestionResponse::from_value(value).unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(response.suggestions[0].location_hint, "corner cafe");
        assert!(response.suggestions[0].image_keywords.is_none());
    }

    #[test]
    fn test_from_value_accepts_empty_list() {
        let response = SuggestionResponse::from_value(json!({ "suggestions": [] })).unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_from_value_rejects_missing_field() {
        let value = json!({ "suggestions": [{ "name": "Only a name" }] });
        let err = SuggestionResponse::from_value(value).unwrap_err();
        assert!(err.starts_with("shape mismatch"), "{}", err);
    }

    #[test]
    fn test_from_value_rejects_missing_top_level_key() {
        let err = SuggestionResponse::from_value(json!({ "ideas": [] })).unwrap_err();
        assert!(err.contains("suggestions"), "{}", err);
    }

    #[test]
    fn test_from_value_rejects_more_than_ten() {
        let items: Vec<_> = (0..11).map(|i| suggestion(&format!("Idea {}", i))).collect();
        let err = SuggestionResponse::from_value(json!({ "suggestions": items })).unwrap_err();
        assert!(err.starts_with("constraint violation"), "{}", err);
    }

    #[test]
    fn test_from_value_rejects_three_image_keywords() {
        let mut item = suggestion("Harbor Walk");
        item["imageKeywords"] = json!("harbor sunset boats");
        let err = SuggestionResponse::from_value(json!({ "suggestions": [item] })).unwrap_err();
        assert!(err.starts_with("constraint violation"), "{}", err);
    }

    #[test]
    fn test_request_validation_rejects_blank_mood() {
        let request = SuggestionRequest {
            location_context: "downtown Metropolis".to_string(),
            mood: "   ".to_string(),
            time_available: "1 hour".to_string(),
            preferences: None,
            ai_provider: AiProvider::Hosted,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_provider_accepts_aliases() {
        let hosted: AiProvider = serde_json::from_str("\"googleai\"").unwrap();
        let local: AiProvider = serde_json::from_str("\"ollama\"").unwrap();
        assert_eq!(hosted, AiProvider::Hosted);
        assert_eq!(local, AiProvider::Local);
        assert_eq!(serde_json::to_string(&AiProvider::Local).unwrap(), "\"local\"");
    }

    #[test]
    fn test_blank_preferences_treated_as_absent() {
        let request = SuggestionRequest {
            location_context: "here".to_string(),
            mood: "Happy".to_string(),
            time_available: "2 hours".to_string(),
            preferences: Some("  ".to_string()),
            ai_provider: AiProvider::Local,
        };
        assert_eq!(request.preferences(), None);
    }
}
