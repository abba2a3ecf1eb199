use crate::domain::ports::Agent;
use crate::server::stats::{round2, StatsSnapshot};
use crate::server::{dashboard, SharedState};
use crate::utils::error::{ErrorCategory, TutorError};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMetadata {
    pub response_time: f64,
    pub category: String,
    pub conversation_length: usize,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub metadata: ChatMetadata,
    pub stats: StatsSnapshot,
}

impl IntoResponse for TutorError {
    fn into_response(self) -> Response {
        let status = match self.category() {
            ErrorCategory::Request => StatusCode::BAD_REQUEST,
            ErrorCategory::Network | ErrorCategory::Upstream => StatusCode::BAD_GATEWAY,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = serde_json::json!({
            "success": false,
            "error": self.user_friendly_message(),
        });
        (status, Json(body)).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(dashboard::page())
}

pub async fn chat(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, TutorError> {
    let Json(request) = payload.map_err(|rejection| TutorError::InvalidRequest {
        message: rejection.body_text(),
    })?;

    let user_query = request.message.trim();
    if user_query.is_empty() {
        return Err(TutorError::InvalidRequest {
            message: "Empty message".to_string(),
        });
    }

    let start = Instant::now();
    let reply = state.agent().await.run(user_query).await;
    let elapsed = start.elapsed();

    let stats = {
        let mut stats = state.stats();
        stats.record(reply.category, elapsed);
        stats.snapshot()
    };

    tracing::info!(
        category = %reply.category,
        elapsed_ms = elapsed.as_millis() as u64,
        "💬 Answered query"
    );

    Ok(Json(ChatResponse {
        success: true,
        metadata: ChatMetadata {
            response_time: round2(elapsed.as_secs_f64()),
            category: reply.category.to_string(),
            conversation_length: reply.conversation_length.unwrap_or(0),
        },
        response: reply.response,
        stats,
    }))
}

pub async fn clear(State(state): State<SharedState>) -> Json<serde_json::Value> {
    state.agent().await.reset_conversation();
    state.stats().reset();
    Json(serde_json::json!({ "success": true }))
}

pub async fn progress(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let summary = state.agent().await.session_summary();
    Json(serde_json::json!({ "success": true, "summary": summary }))
}

pub async fn stats(State(state): State<SharedState>) -> Json<StatsSnapshot> {
    Json(state.stats().snapshot())
}

/// Liveness check.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
