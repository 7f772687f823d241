// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stateless API routes: options, suggestions, images, geocoding, summaries.

use crate::error::{AppError, Result};
use crate::models::suggestion::{MOOD_OPTIONS, TIME_OPTIONS};
use crate::models::{AiProvider, Category, Coordinates, SuggestionRequest, SuggestionResponse};
use crate::services::summarize::{SummaryRequest, SummaryResponse};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/options", get(get_options))
        .route("/api/suggestions", post(post_suggestions))
        .route("/api/images", post(post_image))
        .route("/api/geocode/reverse", get(get_reverse_geocode))
        .route("/api/summaries", post(post_summary))
}

// ─── Options ─────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

/// Choices for the selection controls.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OptionsResponse {
    pub moods: Vec<String>,
    pub times: Vec<OptionItem>,
    pub providers: Vec<OptionItem>,
    pub categories: Vec<String>,
}

async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        moods: MOOD_OPTIONS.iter().map(|m| m.to_string()).collect(),
        times: TIME_OPTIONS
            .iter()
            .map(|(value, label)| OptionItem {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
        providers: AiProvider::ALL
            .iter()
            .map(|p| OptionItem {
                value: p.as_str().to_string(),
                label: p.label().to_string(),
            })
            .collect(),
        categories: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
    })
}

// ─── Suggestions ─────────────────────────────────────────────

async fn post_suggestions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>> {
    let response = state.suggestions.get_suggestions(&request).await?;
    Ok(Json(response))
}

// ─── Images ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImageRequest {
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_uri: Option<String>,
}

/// Generate an image. Failures are reported as an absent URI, never an error.
async fn post_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageRequest>,
) -> Json<ImageResponse> {
    let image_data_uri = state.images.get_image(&request.keywords).await;
    Json(ImageResponse { image_data_uri })
}

// ─── Geocoding ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlaceNameResponse {
    pub name: String,
}

async fn get_reverse_geocode(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<PlaceNameResponse>> {
    let coordinates = Coordinates {
        lat: query.lat,
        lng: query.lng,
    };
    if !coordinates.is_valid() {
        return Err(AppError::BadRequest(
            "Coordinates out of range".to_string(),
        ));
    }

    let name = state.geocoder.reverse(coordinates).await?;
    Ok(Json(PlaceNameResponse { name }))
}

// ─── Summaries ───────────────────────────────────────────────

async fn post_summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>> {
    let response = state.summaries.summarize(&request).await?;
    Ok(Json(response))
}
