//! HTTP routes.

pub mod caller;
mod convert;
mod error;
mod problems;
pub mod state;
mod submissions;

use std::sync::Arc;

use algoarena_api_types::HealthCheckResponse;
use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;

pub use state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(problems::create_problem_router())
        .merge(submissions::create_submission_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
