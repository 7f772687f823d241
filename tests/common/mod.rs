// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wandersnap::config::Config;
use wandersnap::routes::create_router;
use wandersnap::AppState;

/// Create a test app whose upstreams all point at a closed port.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::from_config(config).unwrap());
    (create_router(state.clone()), state)
}

/// Test config with the given upstream base URLs.
#[allow(dead_code)]
pub fn config_with_upstreams(
    gemini: Option<&str>,
    ollama: Option<&str>,
    nominatim: Option<&str>,
) -> Config {
    let mut config = Config::test_default();
    if let Some(url) = gemini {
        config.gemini_base_url = url.to_string();
    }
    if let Some(url) = ollama {
        config.ollama_url = url.to_string();
    }
    if let Some(url) = nominatim {
        config.nominatim_url = url.to_string();
    }
    config
}

// ─── Mock upstreams ──────────────────────────────────────────

/// A fake upstream listening on an ephemeral local port.
#[allow(dead_code)]
pub struct MockServer {
    pub url: String,
    pub hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Answer every request, on any path, with `status` and a raw body.
#[allow(dead_code)]
pub async fn mock_raw(status: StatusCode, body: &'static str) -> MockServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (status, body)
        }
    });
    MockServer {
        url: serve(router).await,
        hits,
    }
}

/// Answer every request, on any path, with `status` and a JSON body.
#[allow(dead_code)]
pub async fn mock_json(status: StatusCode, body: Value) -> MockServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().fallback(move || {
        let counter = counter.clone();
        let body = body.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (status, Json(body))
        }
    });
    MockServer {
        url: serve(router).await,
        hits,
    }
}

/// Answer with `body` only when the User-Agent starts with `agent_prefix`.
/// Anything else gets 403, the way public Nominatim treats anonymous clients.
#[allow(dead_code)]
pub async fn mock_json_for_agent(agent_prefix: &'static str, body: Value) -> MockServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().fallback(move |headers: HeaderMap| {
        let counter = counter.clone();
        let body = body.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let agent = headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if agent.starts_with(agent_prefix) {
                (StatusCode::OK, Json(body)).into_response()
            } else {
                (StatusCode::FORBIDDEN, "missing User-Agent").into_response()
            }
        }
    });
    MockServer {
        url: serve(router).await,
        hits,
    }
}

/// Gemini stand-in that answers text and image requests separately.
#[allow(dead_code)]
pub struct GeminiMock {
    pub url: String,
    pub text_hits: Arc<AtomicUsize>,
    pub image_hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl GeminiMock {
    pub async fn spawn(text: (StatusCode, Value), image: (StatusCode, Value)) -> Self {
        let text_hits = Arc::new(AtomicUsize::new(0));
        let image_hits = Arc::new(AtomicUsize::new(0));
        let (th, ih) = (text_hits.clone(), image_hits.clone());

        let router = Router::new().fallback(move |body: Bytes| {
            let (th, ih) = (th.clone(), ih.clone());
            let (text, image) = (text.clone(), image.clone());
            async move {
                let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                let wants_image = request
                    .pointer("/generationConfig/responseModalities")
                    .is_some();
                if wants_image {
                    ih.fetch_add(1, Ordering::SeqCst);
                    (image.0, Json(image.1)).into_response()
                } else {
                    th.fetch_add(1, Ordering::SeqCst);
                    (text.0, Json(text.1)).into_response()
                }
            }
        });

        Self {
            url: serve(router).await,
            text_hits,
            image_hits,
        }
    }

    pub fn text_hits(&self) -> usize {
        self.text_hits.load(Ordering::SeqCst)
    }

    pub fn image_hits(&self) -> usize {
        self.image_hits.load(Ordering::SeqCst)
    }
}

// ─── Upstream payloads ───────────────────────────────────────

/// A `generateContent` reply carrying `text`.
#[allow(dead_code)]
pub fn gemini_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] }
        }]
    })
}

/// A `generateContent` reply carrying one inline image.
#[allow(dead_code)]
pub fn gemini_image(mime_type: &str, data: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Here is your image." },
                    { "inlineData": { "mimeType": mime_type, "data": data } }
                ]
            }
        }]
    })
}

/// An Ollama `/api/generate` envelope.
#[allow(dead_code)]
pub fn ollama_envelope(response: &str) -> Value {
    json!({ "model": "mistral", "response": response, "done": true })
}

/// A one-suggestion payload in the Relaxation category.
#[allow(dead_code)]
pub fn relaxation_payload() -> Value {
    json!({
        "suggestions": [{
            "name": "Quiet Reading Nook",
            "description": "Settle into a sunny corner with a good book.",
            "category": "Relaxation",
            "estimatedDuration": "45 minutes",
            "locationHint": "the library's third floor",
            "imageKeywords": "reading nook"
        }]
    })
}

/// `count` distinct suggestions named "Spot 1" through "Spot {count}".
#[allow(dead_code)]
pub fn numbered_payload(count: usize) -> Value {
    let suggestions: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "name": format!("Spot {}", i),
                "description": format!("Stop number {} on the tour.", i),
                "category": "Food",
                "estimatedDuration": "20 minutes",
                "locationHint": format!("stall {}", i),
                "imageKeywords": "street food"
            })
        })
        .collect();
    json!({ "suggestions": suggestions })
}

/// Names of the suggestions in a numbered payload, in order.
#[allow(dead_code)]
pub fn numbered_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Spot {}", i)).collect()
}

// ─── Request helpers ─────────────────────────────────────────

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .unwrap();
    // Extractor rejections come back as plain text.
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, value)
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Poll `check` until it holds or two seconds pass.
#[allow(dead_code)]
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..40 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
