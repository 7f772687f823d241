// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: selections, search and the results view.

use crate::error::{AppError, Result};
use crate::models::suggestion::{MAX_LOCATION_CHARS, MOOD_OPTIONS, TIME_OPTIONS};
use crate::models::{Activity, AiProvider, Coordinates, Notification, SearchStatus, Session};
use crate::services::maps::{card_action, ActionKind};
use crate::services::session::search_activities;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/location", put(put_location))
        .route("/api/sessions/{id}/mood", put(put_mood))
        .route("/api/sessions/{id}/time", put(put_time))
        .route("/api/sessions/{id}/provider", put(put_provider))
        .route("/api/sessions/{id}/search", post(post_search))
}

// ─── Views ───────────────────────────────────────────────────

/// An activity card with its resolved call-to-action.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    #[serde(flatten)]
    pub activity: Activity,
    pub action_kind: ActionKind,
    pub action_label: String,
    pub action_url: Option<String>,
}

/// Everything the front-end renders for one session.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub status: SearchStatus,
    pub coordinates: Option<Coordinates>,
    pub location_display_name: Option<String>,
    pub mood: Option<String>,
    pub time_available: Option<String>,
    pub ai_provider: AiProvider,
    pub activities: Vec<CardView>,
    pub notification: Option<Notification>,
    pub updated_at: String,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let display_name = session.location_display_name();
        let activities = session
            .activities()
            .iter()
            .map(|activity| {
                let action = card_action(activity, display_name);
                CardView {
                    activity: activity.clone(),
                    action_kind: action.kind,
                    action_label: action.label,
                    action_url: action.url,
                }
            })
            .collect();

        Self {
            id: session.id.to_string(),
            status: session.status(),
            coordinates: session.coordinates(),
            location_display_name: display_name.map(str::to_string),
            mood: session.mood().map(str::to_string),
            time_available: session.time_available().map(str::to_string),
            ai_provider: session.provider(),
            activities,
            notification: session.notification().cloned(),
            updated_at: format_utc_rfc3339(session.updated_at()),
        }
    }
}

// ─── Lifecycle ───────────────────────────────────────────────

async fn create_session(State(state): State<Arc<AppState>>) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create();
    (StatusCode::CREATED, Json(SessionView::from(&session)))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let session = state.sessions.get(id)?;
    Ok(Json(SessionView::from(&session)))
}

async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.sessions.remove(id) {
        return Err(AppError::NotFound(format!("Session {} not found", id)));
    }
    tracing::debug!(session_id = %id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Selections ──────────────────────────────────────────────

/// Either detected coordinates or a typed place name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocationUpdate {
    Coordinates { lat: f64, lng: f64 },
    Named { name: String },
}

async fn put_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<LocationUpdate>,
) -> Result<Json<SessionView>> {
    // Unknown sessions never reach the geocoder.
    state.sessions.get(id)?;

    let (coordinates, display_name) = match update {
        LocationUpdate::Coordinates { lat, lng } => {
            let coordinates = Coordinates { lat, lng };
            if !coordinates.is_valid() {
                return Err(AppError::BadRequest(
                    "Coordinates out of range".to_string(),
                ));
            }
            let name = match state.geocoder.reverse(coordinates).await {
                Ok(name) => Some(name),
                Err(e) => {
                    tracing::warn!(session_id = %id, error = %e, "Reverse geocoding failed");
                    None
                }
            };
            (Some(coordinates), name)
        }
        LocationUpdate::Named { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::BadRequest(
                    "Location name must not be blank".to_string(),
                ));
            }
            if name.chars().count() > MAX_LOCATION_CHARS {
                return Err(AppError::BadRequest(format!(
                    "Location name must be at most {} characters",
                    MAX_LOCATION_CHARS
                )));
            }
            (None, Some(name.to_string()))
        }
    };

    let session = state.sessions.update(id, |s| {
        s.set_location(coordinates, display_name);
        s.clone()
    })?;
    Ok(Json(SessionView::from(&session)))
}

#[derive(Debug, Deserialize)]
pub struct MoodUpdate {
    pub mood: String,
}

async fn put_mood(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<MoodUpdate>,
) -> Result<Json<SessionView>> {
    if !MOOD_OPTIONS.contains(&update.mood.as_str()) {
        return Err(AppError::BadRequest(format!("Unknown mood: {}", update.mood)));
    }

    let session = state.sessions.update(id, |s| {
        s.set_mood(update.mood);
        s.clone()
    })?;
    Ok(Json(SessionView::from(&session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeUpdate {
    pub time_available: String,
}

async fn put_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<TimeUpdate>,
) -> Result<Json<SessionView>> {
    if !TIME_OPTIONS
        .iter()
        .any(|(value, _)| *value == update.time_available)
    {
        return Err(AppError::BadRequest(format!(
            "Unknown time option: {}",
            update.time_available
        )));
    }

    let session = state.sessions.update(id, |s| {
        s.set_time_available(update.time_available);
        s.clone()
    })?;
    Ok(Json(SessionView::from(&session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUpdate {
    pub ai_provider: AiProvider,
}

async fn put_provider(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProviderUpdate>,
) -> Result<Json<SessionView>> {
    let session = state.sessions.update(id, |s| {
        s.set_provider(update.ai_provider);
        s.clone()
    })?;
    Ok(Json(SessionView::from(&session)))
}

// ─── Search ──────────────────────────────────────────────────

/// Run a search. Provider failures come back as the session's error state.
async fn post_search(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let session =
        search_activities(&state.sessions, &state.suggestions, &state.images, id).await?;
    Ok(Json(SessionView::from(&session)))
}
