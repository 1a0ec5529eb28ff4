//! Gateway Tests
//!
//! Exercises the axum router in-process with `tower::ServiceExt::oneshot`.

use crate::actors::messages::AppError;
use crate::actors::traits::LlmActor;
use crate::agent::CommunityAgent;
use crate::gateway::{router, AppState, SERVICE_NAME};
use crate::models::{CommunityInfo, LlmModel};
use crate::store::DataStore;
use crate::tests::agent_tests::{agent_with, MockLlmActor};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app(response: &str) -> Router {
    let (agent, _) = agent_with(MockLlmActor::new(response));
    router(AppState {
        agent: Arc::new(agent),
        default_model: LlmModel::Mistral,
    })
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let request = Request::get("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(app("unused"), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_root_describes_service() {
    let request = Request::get("/").body(Body::empty()).unwrap();
    let (status, body) = send(app("unused"), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], SERVICE_NAME);
    assert!(body["endpoints"]["/api/chat"].is_string());
}

#[tokio::test]
async fn test_chat_answers_from_store() {
    let (status, body) = send(app("unused"), chat_request(r#"{"message": "find member asha"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "mistral");
    assert!(body["response"].as_str().unwrap().contains("Asha Patil"));
}

#[tokio::test]
async fn test_chat_with_explicit_model() {
    let (status, body) = send(
        app("Namaskar!"),
        chat_request(r#"{"message": "hello", "model": "glm-4.7-flash"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Namaskar!");
    assert_eq!(body["model"], "glm-4.7-flash");
}

#[tokio::test]
async fn test_chat_invalid_json() {
    let (status, body) = send(app("unused"), chat_request("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON in request body");
}

#[tokio::test]
async fn test_chat_missing_message() {
    for payload in [r#"{}"#, r#"{"message": ""}"#, r#"{"model": "mistral"}"#] {
        let (status, body) = send(app("unused"), chat_request(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["error"], "Missing 'message' in request body");
    }
}

#[tokio::test]
async fn test_chat_invalid_model() {
    let (status, body) = send(
        app("unused"),
        chat_request(r#"{"message": "hello", "model": "gpt-4"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid model. Available: [mistral, glm-4.7-flash]");
}

/// LLM whose chat call panics, standing in for an unexpected internal failure
struct PanickingLlm;

#[async_trait]
impl LlmActor for PanickingLlm {
    async fn chat(&self, _: LlmModel, _: String, _: String) -> Result<String, AppError> {
        panic!("simulated crash");
    }

    async fn list_models(&self) -> Result<Vec<String>, AppError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_chat_internal_failure_is_500() {
    let agent = CommunityAgent::new(
        DataStore::from_records(Vec::new(), Vec::new()),
        CommunityInfo::default(),
        Arc::new(PanickingLlm),
    );
    let app = router(AppState {
        agent: Arc::new(agent),
        default_model: LlmModel::Mistral,
    });

    let (status, body) = send(app, chat_request(r#"{"message": "hello"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}
