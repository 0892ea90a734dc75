//! Health and metrics HTTP server
//!
//! Small operational surface alongside the WebSocket endpoints: `/health`
//! reports tracked bus and session counts, `/metrics` serves Prometheus text.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::metrics::{self, ENDPOINT_BROWSER, ENDPOINT_BUS};
use crate::store::PositionStore;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub buses: usize,
    pub bus_sessions: i64,
    pub browser_sessions: i64,
}

/// Shared state for health endpoints
#[derive(Clone)]
pub struct ServerState {
    store: Arc<PositionStore>,
}

impl ServerState {
    pub fn new(store: Arc<PositionStore>) -> Self {
        Self { store }
    }
}

/// Health endpoint - always returns 200 if the server is running
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        buses: state.store.len(),
        bus_sessions: metrics::active_sessions(ENDPOINT_BUS),
        browser_sessions: metrics::active_sessions(ENDPOINT_BROWSER),
    })
}

/// Prometheus metrics endpoint
async fn prom_metrics() -> Result<String, StatusCode> {
    metrics::encode_metrics().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Create the health server router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(prom_metrics))
        .with_state(state)
}

/// Run the health server
pub async fn run_server(addr: SocketAddr, state: ServerState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
