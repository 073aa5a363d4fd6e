//! HTTP handlers for the chat endpoints.
//!
//! Validation happens here, before anything reaches the engine: a rejected
//! request never creates a session. Past this boundary the engine's own
//! degraded-reply contract takes over and normal chat flows cannot return
//! protocol errors.

use crate::error::AppError;
use crate::models::{ChatRequest, ChatResponse, ContextType, Exchange, SessionStats};
use crate::services::{intent::Intent, suggestions};
use crate::startup::AppState;
use axum::extract::{Path, Query, State};
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

/// Main chatbot endpoint.
#[tracing::instrument(skip(state, request), fields(context = request.context.as_str()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    request.validate()?;
    Ok(Json(state.engine.exchange(&request)))
}

/// Context-pinning alias for exhibitor recommendations.
pub async fn exhibitor_chat(
    state: State<AppState>,
    Json(mut request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    request.context = ContextType::Exhibitor;
    chat(state, Json(request)).await
}

/// Context-pinning alias for package suggestions.
pub async fn package_chat(
    state: State<AppState>,
    Json(mut request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    request.context = ContextType::Package;
    chat(state, Json(request)).await
}

/// Context-pinning alias for event information.
pub async fn event_chat(
    state: State<AppState>,
    Json(mut request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    request.context = ContextType::Event;
    chat(state, Json(request)).await
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub exchanges: Vec<Exchange>,
}

/// Retained history window for a session; empty for unknown sessions.
pub async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        exchanges: state.engine.store().history(&session_id),
        session_id,
    })
}

/// Drop a session's history. Reports whether one existed.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<serde_json::Value> {
    let cleared = state.engine.store().clear(&session_id);
    Json(json!({ "session_id": session_id, "cleared": cleared }))
}

/// Mark a session ended. Its history stays readable until cleared.
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.engine.store().end(&session_id) {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "session {} not found",
            session_id
        )));
    }
    Ok(Json(json!({ "session_id": session_id, "status": "ended" })))
}

/// Session metadata and aggregate sentiment.
pub async fn session_stats(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionStats>, AppError> {
    state
        .engine
        .store()
        .stats(&session_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("session {} not found", session_id)))
}

#[derive(Debug, Deserialize)]
pub struct QuickReplyParams {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Quick-reply labels for an intent. Unrecognized intents fall back to
/// the general bucket rather than rejecting the request.
pub async fn quick_replies(
    State(state): State<AppState>,
    Query(params): Query<QuickReplyParams>,
) -> Json<serde_json::Value> {
    let intent = params
        .intent
        .as_deref()
        .map(Intent::parse)
        .unwrap_or(Intent::GeneralInquiry);
    let language = params.language.unwrap_or_else(|| "fr".to_string());
    let replies = suggestions::quick_replies(state.engine.catalog(), intent, &language);
    Json(json!({
        "intent": intent.as_str(),
        "language": language,
        "quick_replies": replies,
    }))
}

/// Chatbot self-test: runs one real exchange through the engine.
pub async fn chatbot_health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let probe = ChatRequest {
        message: "test health".to_string(),
        context: ContextType::General,
        user_id: None,
        session_id: Some("health_probe".to_string()),
    };
    let response = state.engine.exchange(&probe);
    // The probe session is bookkeeping only; do not let it accumulate.
    state.engine.store().clear("health_probe");

    if response.response.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "service": "chat-service" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "chat-service",
            "version": env!("CARGO_PKG_VERSION"),
            "active_sessions": state.engine.active_sessions(),
            "test_response_length": response.response.len(),
        })),
    )
}
