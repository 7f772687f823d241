// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity view model rendered as a card.

use crate::models::suggestion::ActivitySuggestion;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Placeholder shown until an image is generated.
pub const PLACEHOLDER_PHOTO_URL: &str = "https://placehold.co/600x400.png";

/// User coordinates from the browser's geolocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Whether both values are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Icon family shown in the card corner (lucide icon names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CategoryIcon {
    Utensils,
    Trees,
    Palette,
    Coffee,
    MountainSnow,
    ShoppingBag,
    Landmark,
    Film,
    Bike,
    HeartPulse,
    Library,
    Building,
}

impl CategoryIcon {
    pub const DEFAULT: CategoryIcon = CategoryIcon::Building;
}

/// Substring rules checked in order; the first hit wins.
const ICON_RULES: &[(&[&str], CategoryIcon)] = &[
    (&["food", "restaurant", "cafe"], CategoryIcon::Utensils),
    (&["outdoor", "park", "nature", "garden"], CategoryIcon::Trees),
    (&["art", "museum", "gallery", "culture"], CategoryIcon::Palette),
    (&["relax", "chill", "peaceful"], CategoryIcon::Coffee),
    (&["adventure", "explore", "thrill"], CategoryIcon::MountainSnow),
    (&["shop", "market", "boutique"], CategoryIcon::ShoppingBag),
    (
        &["sightsee", "historic", "landmark", "tourist"],
        CategoryIcon::Landmark,
    ),
    (&["entertain", "movie", "show", "game"], CategoryIcon::Film),
    (&["sport", "active", "fitness"], CategoryIcon::Bike),
    (&["wellnes", "health", "spa"], CategoryIcon::HeartPulse),
    (&["education", "learn", "knowledge"], CategoryIcon::Library),
];

/// Map free-text category to an icon. Unknown categories get the default.
pub fn map_category_to_icon(category: &str) -> CategoryIcon {
    let lower = category.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(CategoryIcon::DEFAULT)
}

/// Card data derived from a validated suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Placeholder until an image arrives, then a data URI
    pub photo_url: String,
    pub data_ai_hint: String,
    pub location: Option<Coordinates>,
    pub location_hint: Option<String>,
    pub category: String,
    pub category_icon: CategoryIcon,
    pub estimated_duration: Option<String>,
    /// Keywords used for image generation
    pub image_keywords: String,
}

impl Activity {
    /// Build a card from a suggestion, attaching the user's coordinates.
    pub fn from_suggestion(suggestion: ActivitySuggestion, location: Option<Coordinates>) -> Self {
        let data_ai_hint = data_ai_hint(&suggestion.category, &suggestion.name);
        let image_keywords = suggestion
            .image_keywords
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| data_ai_hint.clone());

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category_icon: map_category_to_icon(&suggestion.category),
            name: suggestion.name,
            description: suggestion.description,
            photo_url: PLACEHOLDER_PHOTO_URL.to_string(),
            data_ai_hint,
            location,
            location_hint: non_empty(suggestion.location_hint),
            category: suggestion.category,
            estimated_duration: non_empty(suggestion.estimated_duration),
            image_keywords,
        }
    }

    pub fn has_generated_photo(&self) -> bool {
        self.photo_url != PLACEHOLDER_PHOTO_URL
    }
}

/// Lowercase category followed by the first word of the name.
fn data_ai_hint(category: &str, name: &str) -> String {
    let first_word = name.split(' ').next().unwrap_or("").to_lowercase();
    format!("{} {}", category.to_lowercase(), first_word)
        .trim()
        .to_string()
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
