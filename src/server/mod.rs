//! HTTP 门面 — 聊天与数据查询端点
//!
//! The HTTP facade over the agent and the dataset store. One `POST
//! /api/chat` endpoint runs a full conversation; the `GET /api/data/*`
//! endpoints answer directly from the store with ready-made charts. CORS
//! is permissive because the expected caller is a browser frontend served
//! from a different origin.

mod data;
mod error;

pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::{Agent, ChatOutcome};
use crate::dataset::DatasetStore;
use crate::service::AnthropicClient;
use crate::{Error, Result};

/// Everything the handlers need, shared across requests.
pub struct ServerState {
    pub agent: Agent,
    pub store: Arc<DatasetStore>,
}

impl ServerState {
    pub fn new(agent: Agent, store: Arc<DatasetStore>) -> Self {
        Self { agent, store }
    }
}

/// Build the application router.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .route("/api/data/papers-by-year", get(data::papers_by_year))
        .route("/api/data/top-authors", get(data::top_authors))
        .route("/api/data/citation-stats", get(data::citation_stats))
        .route(
            "/api/data/collaboration-stats",
            get(data::collaboration_stats),
        )
        .route("/api/data/yearly-trend", get(data::yearly_trend))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(state: ServerState, bind: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|_| Error::configuration(format!("invalid bind address: {}", bind)))?;
    let app = router(Arc::new(state));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

async fn index() -> Json<Value> {
    Json(json!({
        "name": "SciSciNet UMD LLM Agent API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/chat": "POST - Chat with the agent",
            "/api/data/papers-by-year": "GET - Papers by year",
            "/api/data/top-authors": "GET - Top authors",
            "/api/data/citation-stats": "GET - Citation statistics",
            "/api/data/collaboration-stats": "GET - Collaboration statistics",
            "/api/data/yearly-trend": "GET - Yearly trends",
            "/api/health": "GET - Health check"
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "credential_configured": AnthropicClient::credential_available(),
    }))
}

/// Run one conversation. The body is inspected manually so a missing or
/// non-string `message` yields the facade's own 400 envelope instead of
/// an extractor rejection.
async fn chat(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<Value>,
) -> std::result::Result<Json<ChatOutcome>, ApiError> {
    let message = body
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let outcome = state.agent.chat(message).await?;
    Ok(Json(outcome))
}
