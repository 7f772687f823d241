// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort image generation for activity cards.
//!
//! Never returns an error: every failure is logged and reported as "no
//! image" so the card keeps its placeholder.

use crate::services::hosted::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, SafetySetting,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Fixed safety thresholds sent with every image request.
const SAFETY_SETTINGS: [(&str, &str); 4] = [
    ("HARM_CATEGORY_HATE_SPEECH", "BLOCK_MEDIUM_AND_ABOVE"),
    ("HARM_CATEGORY_DANGEROUS_CONTENT", "BLOCK_NONE"),
    ("HARM_CATEGORY_HARASSMENT", "BLOCK_MEDIUM_AND_ABOVE"),
    ("HARM_CATEGORY_SEXUALLY_EXPLICIT", "BLOCK_MEDIUM_AND_ABOVE"),
];

/// Generates illustrative images via the hosted provider.
#[derive(Clone)]
pub struct ImageService {
    client: GeminiClient,
    model: String,
}

impl ImageService {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Generate an image for `keywords`, returned as a data URI.
    pub async fn get_image(&self, keywords: &str) -> Option<String> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            tracing::debug!("Image generation skipped due to empty keywords");
            return None;
        }

        let request = image_request(keywords);
        let response = match self.client.generate_content(&self.model, &request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(keywords, error = %e, "Image generation failed");
                return None;
            }
        };

        let Some(inline) = response.first_inline_data() else {
            tracing::warn!(keywords, "Image generation returned no media");
            return None;
        };

        if !inline.mime_type.starts_with("image/") || BASE64.decode(&inline.data).is_err() {
            tracing::warn!(
                keywords,
                mime_type = %inline.mime_type,
                "Image generation returned an unusable payload"
            );
            return None;
        }

        tracing::debug!(keywords, bytes = inline.data.len(), "Image generated");
        Some(format!("data:{};base64,{}", inline.mime_type, inline.data))
    }
}

fn image_request(keywords: &str) -> GenerateContentRequest {
    let prompt = format!(
        "Generate a vibrant and appealing photorealistic image suitable for a travel app \
         suggestion, representing: \"{}\". Focus on a clear subject, with a slightly artistic \
         touch. Avoid text in the image.",
        keywords
    );

    GenerateContentRequest {
        contents: vec![Content::user_text(&prompt)],
        generation_config: Some(GenerationConfig {
            // The image model requires both modalities
            response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            ..Default::default()
        }),
        safety_settings: SAFETY_SETTINGS
            .iter()
            .map(|(category, threshold)| SafetySetting {
                category: category.to_string(),
                threshold: threshold.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_image_request_carries_safety_settings() {
        let value = serde_json::to_value(image_request("mountain hike")).unwrap();
        assert_eq!(value["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(value["safetySettings"][1]["threshold"], "BLOCK_NONE");
        assert_eq!(
            value["generationConfig"]["responseModalities"],
            serde_json::json!(["TEXT", "IMAGE"])
        );
        assert!(value["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("\"mountain hike\""));
    }

    #[tokio::test]
    async fn test_blank_keywords_short_circuit() {
        // Unroutable base URL: any network attempt would fail, not hang.
        let client =
            GeminiClient::new("http://127.0.0.1:9", Some("k".into()), Duration::from_secs(1))
                .unwrap();
        let service = ImageService::new(client, "image-model");
        assert_eq!(service.get_image("   ").await, None);
    }
}
