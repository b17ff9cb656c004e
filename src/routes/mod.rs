//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP surface stands in for an interactive shell: a client posts a
//! problem statement and gets back the positioned graph as JSON or as a
//! rendered SVG.

pub mod flowchart;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/flowchart", post(flowchart::generate))
        .route("/api/flowchart/svg", post(flowchart::generate_svg))
        .route("/api/flowchart/parse", post(flowchart::parse_steps))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
