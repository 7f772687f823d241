// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-session UI state.
//!
//! All mutations go through the setters below; the session store is the
//! only owner of a `Session`.

use crate::error::{AppError, Result};
use crate::models::activity::{Activity, Coordinates};
use crate::models::suggestion::{AiProvider, SuggestionRequest, SuggestionResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Display name used when reverse geocoding fails.
pub const FALLBACK_LOCATION_NAME: &str = "Nearby Area";

/// Where the results panel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// No search issued yet ("Ready to Explore?")
    Idle,
    Loading,
    Results,
    /// Search succeeded with zero suggestions
    NoResults,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Toast-style message for the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Ticket returned by `begin_search`; results are only accepted for the
/// generation it names.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub generation: u64,
    pub request: SuggestionRequest,
}

/// Image patch target for a spawned image task.
#[derive(Debug, Clone)]
pub struct ImageJob {
    pub generation: u64,
    pub activity_id: String,
    pub keywords: String,
}

/// One user's selections and results.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    coordinates: Option<Coordinates>,
    location_display_name: Option<String>,
    mood: Option<String>,
    time_available: Option<String>,
    provider: AiProvider,
    status: SearchStatus,
    activities: Vec<Activity>,
    notification: Option<Notification>,
    generation: u64,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates: None,
            location_display_name: None,
            mood: None,
            time_available: None,
            provider: AiProvider::default(),
            status: SearchStatus::Idle,
            activities: Vec::new(),
            notification: None,
            generation: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn location_display_name(&self) -> Option<&str> {
        self.location_display_name.as_deref()
    }

    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }

    pub fn time_available(&self) -> Option<&str> {
        self.time_available.as_deref()
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record detected coordinates and the resolved display name.
    ///
    /// A `None` name means the lookup failed; the fallback name is used.
    pub fn set_location(&mut self, coordinates: Option<Coordinates>, display_name: Option<String>) {
        self.coordinates = coordinates;
        match display_name {
            Some(name) => {
                self.notification = Some(Notification::info("Location Identified!", name.clone()));
                self.location_display_name = Some(name);
            }
            None => {
                self.location_display_name = Some(FALLBACK_LOCATION_NAME.to_string());
                self.notification = Some(Notification::info(
                    "Location Name Info",
                    "Could not fetch specific place name, using coordinates.",
                ));
            }
        }
        self.touch();
    }

    pub fn set_mood(&mut self, mood: String) {
        self.mood = Some(mood);
        self.touch();
    }

    pub fn set_time_available(&mut self, time_available: String) {
        self.time_available = Some(time_available);
        self.touch();
    }

    pub fn set_provider(&mut self, provider: AiProvider) {
        self.provider = provider;
        self.touch();
    }

    /// Text describing where the user is, for the prompt.
    pub fn location_context(&self) -> String {
        if let Some(name) = &self.location_display_name {
            return name.clone();
        }
        match self.coordinates {
            Some(c) => format!("area around {:.2}, {:.2}", c.lat, c.lng),
            None => "my current area".to_string(),
        }
    }

    /// Validate selections and enter the loading state.
    ///
    /// Clears previous results and bumps the generation so late image
    /// patches from an older search are rejected.
    pub fn begin_search(&mut self) -> Result<SearchTicket> {
        if self.coordinates.is_none() && self.location_display_name.is_none() {
            return Err(self.reject("Missing Location", "Please detect your location first."));
        }
        let Some(mood) = self.mood.clone() else {
            return Err(self.reject("Missing Mood", "Please select your mood."));
        };
        let Some(time_available) = self.time_available.clone() else {
            return Err(self.reject("Missing Time", "Please select your available time."));
        };

        self.generation += 1;
        self.status = SearchStatus::Loading;
        self.activities.clear();
        self.notification = None;
        self.touch();

        Ok(SearchTicket {
            generation: self.generation,
            request: SuggestionRequest {
                location_context: self.location_context(),
                mood,
                time_available,
                preferences: None,
                ai_provider: self.provider,
            },
        })
    }

    /// Store a successful response. Returns the image jobs to launch, or
    /// `None` if the ticket is stale.
    pub fn complete_search(
        &mut self,
        generation: u64,
        response: SuggestionResponse,
    ) -> Option<Vec<ImageJob>> {
        if generation != self.generation {
            return None;
        }

        let location = self.coordinates;
        self.activities = response
            .suggestions
            .into_iter()
            .map(|s| Activity::from_suggestion(s, location))
            .collect();

        if self.activities.is_empty() {
            self.status = SearchStatus::NoResults;
            self.notification = Some(Notification::info(
                "No Suggestions",
                "The AI couldn't find any suggestions for your criteria. Try different options!",
            ));
        } else {
            self.status = SearchStatus::Results;
        }
        self.touch();

        Some(
            self.activities
                .iter()
                .map(|a| ImageJob {
                    generation,
                    activity_id: a.id.clone(),
                    keywords: a.image_keywords.clone(),
                })
                .collect(),
        )
    }

    /// Record a failed search: activities cleared, one destructive message.
    pub fn fail_search(&mut self, generation: u64, error: &AppError) -> bool {
        if generation != self.generation {
            return false;
        }
        self.activities.clear();
        self.status = SearchStatus::Error;
        self.notification = Some(Notification::destructive(
            "AI Suggestion Error",
            error.user_message(),
        ));
        self.touch();
        true
    }

    /// Replace a card's placeholder photo.
    ///
    /// Ignored unless the generation matches and the card still exists.
    pub fn patch_photo(&mut self, generation: u64, activity_id: &str, photo_url: String) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.activities.iter_mut().find(|a| a.id == activity_id) {
            Some(activity) => {
                activity.photo_url = photo_url;
                self.touch();
                true
            }
            None => false,
        }
    }

    fn reject(&mut self, title: &str, description: &str) -> AppError {
        self.notification = Some(Notification::destructive(title, description));
        self.touch();
        AppError::BadRequest(description.to_string())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
