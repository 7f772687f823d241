// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google AI (Gemini) client and the hosted suggestion provider.
//!
//! Handles:
//! - `generateContent` calls with an explicit model per call
//! - Schema-constrained JSON output (`responseSchema`)
//! - Mapping of transport failures to `AppError::Transport`

use crate::error::{AppError, Result};
use crate::models::{AiProvider, Category, SuggestionRequest, SuggestionResponse};
use crate::services::decode::decode_generation;
use crate::services::provider::SuggestionProvider;
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a client with a per-request timeout.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building Gemini HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Call `models/{model}:generateContent`.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| AppError::Transport {
            provider: AiProvider::Hosted,
            message: "GOOGLE_API_KEY is not configured".to_string(),
        })?;

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Transport {
                provider: AiProvider::Hosted,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!(model, "Google AI rate limit hit (429)");
            }
            return Err(AppError::http_status(AiProvider::Hosted, status, &body));
        }

        response.json().await.map_err(|e| AppError::Protocol {
            provider: AiProvider::Hosted,
            message: format!("JSON parse error: {}", e),
        })
    }

    /// Generate JSON constrained by `schema`. Returns the raw text, or `None`
    /// if the model produced no output.
    pub async fn generate_structured(
        &self,
        model: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<Option<String>> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                response_modalities: None,
            }),
            safety_settings: Vec::new(),
        };

        let response = self.generate_content(model, &request).await?;
        Ok(response.first_text())
    }
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.to_string()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64 payload returned for generated media.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text of the first candidate, if any.
    pub fn first_text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline media part of the first candidate.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}

// ─── Hosted suggestion provider ──────────────────────────────

/// OpenAPI-subset schema for `SuggestionResponse`, as Gemini expects it.
pub fn suggestion_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": {
                "type": "ARRAY",
                "description": "A list of 0 to 10 tailored activity suggestions.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "The concise and catchy name of the suggested activity." },
                        "description": { "type": "STRING", "description": "An engaging, user-facing description of the activity (2-3 sentences)." },
                        "category": {
                            "type": "STRING",
                            "description": format!("A category for the activity. Choose from: {}.", Category::joined_labels())
                        },
                        "estimatedDuration": { "type": "STRING", "description": "An estimated duration that fits the user's available time." },
                        "locationHint": { "type": "STRING", "description": "A brief, general hint about where this activity might be found." },
                        "imageKeywords": { "type": "STRING", "description": "One or two keywords for an illustrative image." }
                    },
                    "required": ["name", "description", "category", "estimatedDuration", "locationHint"]
                }
            }
        },
        "required": ["suggestions"]
    })
}

/// Suggestions from Gemini with schema-constrained decoding.
pub struct HostedSuggestionProvider {
    client: GeminiClient,
    model: String,
}

impl HostedSuggestionProvider {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SuggestionProvider for HostedSuggestionProvider {
    fn kind(&self) -> AiProvider {
        AiProvider::Hosted
    }

    async fn fetch_suggestions(
        &self,
        _request: &SuggestionRequest,
        prompt: &str,
    ) -> Result<SuggestionResponse> {
        let text = self
            .client
            .generate_structured(&self.model, prompt, suggestion_response_schema())
            .await?;

        match text {
            Some(text) if text.trim() != "null" => decode_generation(AiProvider::Hosted, &text),
            _ => {
                tracing::warn!(model = %self.model, "Hosted model returned no output");
                Ok(SuggestionResponse::empty())
            }
        }
    }
}
