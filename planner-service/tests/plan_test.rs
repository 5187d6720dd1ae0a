mod common;

use axum::http::StatusCode;
use common::{app_with, post_json};
use planner_service::services::{MockTextProvider, ProviderError};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn paris_scenario_returns_model_text_verbatim() {
    let provider = Arc::new(MockTextProvider::returning("Day 1: ..."));
    let app = app_with(provider.clone());

    let (status, body) = post_json(
        app,
        "/api/plan",
        r#"{"destination":"Paris, France","duration":3,"budget":"Luxury","interests":["Art","History","Fine Dining"]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "itinerary": "Day 1: ..." }));
    assert_eq!(provider.calls(), 1);

    let prompt = provider.last_prompt().expect("provider saw a prompt");
    assert!(prompt.user.contains("Paris, France"));
    assert!(prompt.user.contains("3 days"));
    assert!(prompt.user.contains("Art, History, Fine Dining"));
}

#[tokio::test]
async fn zero_duration_is_rejected_without_calling_model() {
    let provider = Arc::new(MockTextProvider::returning("unused"));

    for duration in [0, -2] {
        let body = json!({
            "destination": "Rome",
            "duration": duration,
            "budget": "Moderate",
            "interests": ["Food"]
        });
        let (status, body) = post_json(app_with(provider.clone()), "/api/plan", &body.to_string()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Validation error");
        assert!(body["details"].as_str().unwrap().contains("duration"));
    }

    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn blank_destination_is_rejected() {
    let provider = Arc::new(MockTextProvider::returning("unused"));

    let (status, _) = post_json(
        app_with(provider.clone()),
        "/api/plan",
        r#"{"destination":"  ","duration":2,"budget":"Budget","interests":[]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn shape_errors_are_bad_requests() {
    let provider = Arc::new(MockTextProvider::returning("unused"));
    let cases = [
        // missing interests
        r#"{"destination":"Rome","duration":2,"budget":"Budget"}"#,
        // duration not an integer
        r#"{"destination":"Rome","duration":"two","budget":"Budget","interests":[]}"#,
        r#"{"destination":"Rome","duration":2.5,"budget":"Budget","interests":[]}"#,
        // interests not a list
        r#"{"destination":"Rome","duration":2,"budget":"Budget","interests":"Food"}"#,
        // unknown budget tier
        r#"{"destination":"Rome","duration":2,"budget":"Shoestring","interests":[]}"#,
        // not JSON at all
        "destination=Rome",
    ];

    for case in cases {
        let (status, body) = post_json(app_with(provider.clone()), "/api/plan", case).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "case: {}", case);
        assert!(body["error"].is_string(), "case: {}", case);
    }

    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn empty_interests_proceed_normally() {
    let provider = Arc::new(MockTextProvider::returning("Day 1: Walk the old town"));

    let (status, body) = post_json(
        app_with(provider.clone()),
        "/api/plan",
        r#"{"destination":"Tallinn","duration":1,"budget":"Budget","interests":[]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itinerary"], "Day 1: Walk the old town");
    assert!(provider
        .last_prompt()
        .unwrap()
        .user
        .contains("Interests: not specified"));
}

#[tokio::test]
async fn network_failure_becomes_generic_server_error() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::NetworkError(
        "connection reset by peer".to_string(),
    )));

    let (status, body) = post_json(
        app_with(provider.clone()),
        "/api/plan",
        r#"{"destination":"Paris, France","duration":3,"budget":"Luxury","interests":["Art"]}"#,
    )
    .await;

    assert!(status.is_server_error());
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "Itinerary generation failed" }));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn every_provider_failure_looks_the_same_to_callers() {
    let failures = [
        ProviderError::AuthenticationFailed("401".to_string()),
        ProviderError::RateLimited,
        ProviderError::MalformedResponse("eof".to_string()),
        ProviderError::EmptyResponse,
    ];

    for failure in failures {
        let provider = Arc::new(MockTextProvider::failing(failure));
        let (status, body) = post_json(
            app_with(provider),
            "/api/plan",
            r#"{"destination":"Oslo","duration":2,"budget":"Moderate","interests":[]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Itinerary generation failed");
    }
}
