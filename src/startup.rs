//! Application startup and lifecycle management.

use crate::config::ChatConfig;
use crate::error::AppError;
use crate::handlers::{chat, matching};
use crate::services::{Catalog, ChatEngine};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ChatConfig,
    pub engine: Arc<ChatEngine>,
}

/// Health check endpoint for Docker/K8s liveness probes.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "chat-service",
            "version": env!("CARGO_PKG_VERSION"),
            "active_sessions": state.engine.active_sessions(),
        })),
    )
}

/// Readiness check endpoint for K8s readiness probes. The engine is pure
/// in-memory state, so ready as soon as it is constructed.
async fn readiness_check() -> StatusCode {
    StatusCode::OK
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let catalog = Catalog::load(config.catalog.path.as_deref().map(Path::new)).map_err(|e| {
            tracing::error!("Failed to load reply catalog: {}", e);
            e
        })?;

        let engine = Arc::new(ChatEngine::new(catalog, config.session.clone()));
        tracing::info!(
            history_limit = config.session.history_limit,
            context_window = config.session.context_window,
            "Initialized chat engine"
        );

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("chat-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState {
                config,
                engine,
            },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/api/chat", post(chat::chat))
        .route("/api/chat/exhibitor", post(chat::exhibitor_chat))
        .route("/api/chat/package", post(chat::package_chat))
        .route("/api/chat/event", post(chat::event_chat))
        .route("/api/chat/quick-replies", get(chat::quick_replies))
        .route(
            "/api/chat/history/:session_id",
            get(chat::session_history).delete(chat::clear_session),
        )
        .route("/api/chat/session/:session_id/end", post(chat::end_session))
        .route(
            "/api/chat/session/:session_id/stats",
            get(chat::session_stats),
        )
        .route("/api/chatbot/health", get(chat::chatbot_health))
        .route(
            "/api/matching/compatibility",
            post(matching::calculate_compatibility),
        )
        .route(
            "/api/networking/profiles",
            post(matching::networking_profiles),
        )
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}
