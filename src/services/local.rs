// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ollama client and the local suggestion provider.
//!
//! The daemon returns free text; decoding and validation are done here via
//! [`decode_generation`].

use crate::error::{AppError, Result};
use crate::models::{AiProvider, SuggestionRequest, SuggestionResponse};
use crate::services::decode::decode_generation;
use crate::services::provider::SuggestionProvider;
use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const GENERATE_PATH: &str = "/api/generate";

/// Body for `POST /api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    format: &'a str,
    stream: bool,
}

/// Suggestions from a locally running Ollama daemon.
pub struct LocalSuggestionProvider {
    http: reqwest::Client,
    url: String,
    model: String,
}

impl LocalSuggestionProvider {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building Ollama HTTP client")?;

        Ok(Self {
            http,
            url: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH),
            model: model.into(),
        })
    }

    /// Send the prompt and return the raw `response` text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            format: "json",
            stream: false,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport {
                provider: AiProvider::Local,
                message: format!("request to {} failed: {}", self.url, e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::http_status(AiProvider::Local, status, &body));
        }

        let envelope: Value = response.json().await.map_err(|e| AppError::Protocol {
            provider: AiProvider::Local,
            message: format!("envelope is not JSON: {}", e),
        })?;

        extract_response_text(envelope)
    }
}

/// Pull the `response` string out of an Ollama envelope.
fn extract_response_text(mut envelope: Value) -> Result<String> {
    match envelope.get_mut("response").map(Value::take) {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(AppError::Protocol {
            provider: AiProvider::Local,
            message: format!("'response' field is not a string: {}", other),
        }),
        None => Err(AppError::Protocol {
            provider: AiProvider::Local,
            message: "envelope has no 'response' field".to_string(),
        }),
    }
}

#[async_trait]
impl SuggestionProvider for LocalSuggestionProvider {
    fn kind(&self) -> AiProvider {
        AiProvider::Local
    }

    async fn fetch_suggestions(
        &self,
        _request: &SuggestionRequest,
        prompt: &str,
    ) -> Result<SuggestionResponse> {
        let text = self.generate(prompt).await?;
        tracing::debug!(model = %self.model, chars = text.len(), "Received local model output");
        decode_generation(AiProvider::Local, &text)
    }
}
