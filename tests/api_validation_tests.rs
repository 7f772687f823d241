// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_suggestion_blank_mood_rejected() {
    let ollama = common::mock_json(StatusCode::OK, common::ollama_envelope("{}")).await;
    let config = common::config_with_upstreams(None, Some(&ollama.url), None);
    let (app, _state) = common::create_test_app_with(config);

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/suggestions",
            json!({
                "locationContext": "Springfield",
                "mood": "   ",
                "timeAvailable": "1 hour",
                "aiProvider": "local"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(ollama.hits(), 0);
}

#[tokio::test]
async fn test_suggestion_location_too_long() {
    let (app, _state) = common::create_test_app();

    let (status, _) = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/suggestions",
            json!({
                "locationContext": "a".repeat(201),
                "mood": "Happy",
                "timeAvailable": "1 hour"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_provider_rejected() {
    let (app, _state) = common::create_test_app();

    let (status, _) = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/suggestions",
            json!({
                "locationContext": "Springfield",
                "mood": "Happy",
                "timeAvailable": "1 hour",
                "aiProvider": "openai"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_reverse_geocode_out_of_range() {
    let (app, _state) = common::create_test_app();

    let (status, _) = common::send(
        &app,
        common::empty_request("GET", "/api/geocode/reverse?lat=91&lng=0"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reverse_geocode_missing_param() {
    let (app, _state) = common::create_test_app();

    let (status, _) = common::send(
        &app,
        common::empty_request("GET", "/api/geocode/reverse?lat=10"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_empty_description_rejected() {
    let gemini = common::mock_json(StatusCode::OK, common::gemini_text("{}")).await;
    let config = common::config_with_upstreams(Some(&gemini.url), None, None);
    let (app, _state) = common::create_test_app_with(config);

    let (status, _) = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/summaries",
            json!({
                "activityDescription": "",
                "mood": "Happy",
                "timeAvailable": "1 hour"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(gemini.hits(), 0);
}

#[tokio::test]
async fn test_session_location_blank_name_rejected() {
    let (app, _state) = common::create_test_app();
    let (_, body) = common::send(&app, common::empty_request("POST", "/api/sessions")).await;
    let id = body["id"].as_str().unwrap();

    let (status, _) = common::send(
        &app,
        common::json_request(
            "PUT",
            &format!("/api/sessions/{}/location", id),
            json!({ "name": "  " }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_location_name_too_long() {
    let (app, state) = common::create_test_app();
    let (_, body) = common::send(&app, common::empty_request("POST", "/api/sessions")).await;
    let id = body["id"].as_str().unwrap();
    let uri = format!("/api/sessions/{}/location", id);

    let (status, body) = common::send(
        &app,
        common::json_request("PUT", &uri, json!({ "name": "a".repeat(201) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    let session = state.sessions.get(id.parse().unwrap()).unwrap();
    assert_eq!(session.location_display_name(), None);

    // Multi-byte names are measured in characters.
    let (status, body) = common::send(
        &app,
        common::json_request("PUT", &uri, json!({ "name": "é".repeat(200) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locationDisplayName"], "é".repeat(200));
}

#[tokio::test]
async fn test_session_bad_id_rejected() {
    let (app, _state) = common::create_test_app();

    let (status, _) = common::send(
        &app,
        common::empty_request("GET", "/api/sessions/not-a-uuid"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_unknown_time_rejected() {
    let (app, _state) = common::create_test_app();
    let (_, body) = common::send(&app, common::empty_request("POST", "/api/sessions")).await;
    let id = body["id"].as_str().unwrap();

    let (status, _) = common::send(
        &app,
        common::json_request(
            "PUT",
            &format!("/api/sessions/{}/time", id),
            json!({ "timeAvailable": "3 weeks" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
