// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Suggestion service.
//!
//! Handles the core workflow:
//! 1. Validate the request
//! 2. Render the prompt
//! 3. Dispatch to the provider named by the request
//! 4. Return the validated, provider-ordered suggestions
//!
//! A failure in the selected provider is returned as-is; there is no
//! fallback to the other provider.

use crate::error::Result;
use crate::models::{AiProvider, SuggestionRequest, SuggestionResponse};
use crate::services::prompt::build_suggestion_prompt;
use crate::services::provider::SuggestionProvider;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

/// Routes suggestion requests to the hosted or local provider.
#[derive(Clone)]
pub struct SuggestionService {
    hosted: Arc<dyn SuggestionProvider>,
    local: Arc<dyn SuggestionProvider>,
}

impl SuggestionService {
    pub fn new(hosted: Arc<dyn SuggestionProvider>, local: Arc<dyn SuggestionProvider>) -> Self {
        Self { hosted, local }
    }

    fn provider(&self, kind: AiProvider) -> &dyn SuggestionProvider {
        match kind {
            AiProvider::Hosted => self.hosted.as_ref(),
            AiProvider::Local => self.local.as_ref(),
        }
    }

    /// Fetch suggestions for a request. Zero suggestions is success.
    pub async fn get_suggestions(&self, request: &SuggestionRequest) -> Result<SuggestionResponse> {
        request.validate()?;

        let prompt = build_suggestion_prompt(request);
        let provider = self.provider(request.ai_provider);
        let started = Instant::now();

        tracing::info!(
            provider = %request.ai_provider,
            location = %request.location_context,
            mood = %request.mood,
            time_available = %request.time_available,
            "Requesting suggestions"
        );

        match provider.fetch_suggestions(request, &prompt).await {
            Ok(response) => {
                tracing::info!(
                    provider = %provider.kind(),
                    count = response.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Suggestions received"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    provider = %request.ai_provider,
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Suggestion request failed"
                );
                Err(e)
            }
        }
    }
}
