//! Axum-based HTTP gateway exposing the assistant.
//!
//! - `GET /` service description
//! - `GET /api/health` liveness probe
//! - `POST /api/chat` `{message, model?}` -> `{response, model}`
//!
//! Client mistakes are answered with 400 and a descriptive `{"error": ...}`
//! body; anything unexpected with a bare 500.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::actors::traits::LlmActor;
use crate::agent::CommunityAgent;
use crate::error::AppError;
use crate::models::{ChatContext, ChatRequest, ChatResponse, LlmModel};

pub const SERVICE_NAME: &str = "Garje Marathi AI API";
const SERVICE_DESCRIPTION: &str = "AI Assistant for Garje Marathi Community";

/// Shared, read-only state of the gateway.
pub struct AppState<L: LlmActor> {
    pub agent: Arc<CommunityAgent<L>>,
    /// Model used when a request does not name one.
    pub default_model: LlmModel,
}

impl<L: LlmActor> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            agent: Arc::clone(&self.agent),
            default_model: self.default_model,
        }
    }
}

pub fn router<L: LlmActor>(state: AppState<L>) -> Router {
    // ── CORS — browser clients may call from any origin ──
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/api/health", get(handle_health))
        .route("/api/chat", post(handle_chat::<L>))
        .with_state(state)
        .layer(cors)
}

/// Binds `addr` and serves until the process stops.
pub async fn serve<L: LlmActor>(addr: &str, state: AppState<L>) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await?;
    info!("{} listening on http://{}", SERVICE_NAME, listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// GET / — service description
async fn handle_root() -> impl IntoResponse {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": SERVICE_DESCRIPTION,
        "endpoints": {
            "/api/chat": "POST - Send a message to the AI",
            "/api/health": "GET - Health check"
        }
    }))
}

/// GET /api/health
async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// POST /api/chat — answer one message
#[instrument(skip(state, body), fields(request_id = %Uuid::new_v4()))]
async fn handle_chat<L: LlmActor>(
    State(state): State<AppState<L>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    // ── Parse body ──
    let Json(request) = match body {
        Ok(b) => b,
        Err(e) => {
            warn!("Chat JSON parse error: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON in request body");
        }
    };

    if let Err(e) = request.validate() {
        warn!("Chat request rejected: {}", e);
        return error_response(StatusCode::BAD_REQUEST, "Missing 'message' in request body");
    }

    // ── Model selection ──
    let model = match request.model.as_deref() {
        None => state.default_model,
        Some(name) => match name.parse::<LlmModel>() {
            Ok(model) => model,
            Err(_) => {
                let message = format!("Invalid model. Available: [{}]", LlmModel::available_names());
                return error_response(StatusCode::BAD_REQUEST, &message);
            }
        },
    };

    let message = request.message.unwrap_or_default();
    let agent = Arc::clone(&state.agent);
    let ctx = ChatContext::new(model);

    // A panic inside the agent surfaces as a JoinError instead of a dropped connection.
    let task = tokio::spawn(async move { agent.handle_message(&message, &ctx).await });
    match task.await {
        Ok(response) => {
            let body = ChatResponse {
                response,
                model: model.as_str().to_string(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let err = AppError::Internal(format!("chat task failed: {}", e));
            error!("Chat handler error: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
