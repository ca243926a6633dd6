// src/lib.rs
pub mod auth;
pub mod config;
pub mod dtos;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod modules;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// The whole HTTP application, mounted under `/api`.
pub fn build_app(state: AppState) -> Router {
    let api = routes::create_router(state.clone())
        .route("/", get(|| async { "SGE-CIR API" }))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
