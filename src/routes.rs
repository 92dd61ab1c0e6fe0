//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/api` and everything under it goes to the reverse proxy. Every other path
//! is served from the client bundle; paths with no matching file get
//! `index.html` so the client router can resolve them (history mode).

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{any, get};
use serde::Serialize;
use tower_http::compression::Compression;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::proxy;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    upstream: String,
}

pub fn app(state: AppState) -> Router {
    let dist = state.config.dist_dir.clone();
    let spa = ServeDir::new(&dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/api", any(proxy::forward))
        .route("/api/{*rest}", any(proxy::forward))
        .route("/healthz", get(healthz))
        .fallback_service(Compression::new(spa))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> Json<Health> {
    Json(Health { status: "ok", upstream: state.config.api_origin.clone() })
}
