// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WanderSnap: AI-suggested activities for where you are right now
//!
//! This crate provides the backend API that turns a location, mood and
//! available time into validated activity suggestions from a hosted or
//! local language model, and tracks each user's results as session state.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{
    GeminiClient, GeocodingService, HostedSuggestionProvider, ImageService,
    LocalSuggestionProvider, SessionStore, SuggestionService, SummaryService,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub suggestions: SuggestionService,
    pub images: ImageService,
    pub geocoder: GeocodingService,
    pub summaries: SummaryService,
    pub sessions: SessionStore,
}

impl AppState {
    /// Wire up all services from configuration.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let text_client = GeminiClient::new(
            &config.gemini_base_url,
            config.google_api_key.clone(),
            config.request_timeout,
        )?;
        let image_client = GeminiClient::new(
            &config.gemini_base_url,
            config.google_api_key.clone(),
            config.image_timeout,
        )?;

        let hosted = Arc::new(HostedSuggestionProvider::new(
            text_client.clone(),
            config.gemini_model.clone(),
        ));
        let local = Arc::new(LocalSuggestionProvider::new(
            &config.ollama_url,
            config.ollama_model.clone(),
            config.request_timeout,
        )?);

        Ok(Self {
            suggestions: SuggestionService::new(hosted, local),
            images: ImageService::new(image_client, config.gemini_image_model.clone()),
            geocoder: GeocodingService::new(&config.nominatim_url, config.geocode_timeout)?,
            summaries: SummaryService::new(text_client, config.gemini_model.clone()),
            sessions: SessionStore::new(config.session_ttl),
            config,
        })
    }
}
