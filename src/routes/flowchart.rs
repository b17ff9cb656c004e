//! Flowchart generation routes.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::flowchart::ast::{Edge, Flowchart, Layout, Node};
use crate::flowchart::{layout, parse_and_build, render_svg};
use crate::services::flowchart::{FlowchartError, ensure_problem, generate_flowchart};
use crate::state::AppState;

/// Shown to the user above the raw error detail.
const GENERIC_FAILURE: &str = "Error generating flowchart";

#[derive(Deserialize)]
pub struct GenerateBody {
    pub problem: String,
}

#[derive(Deserialize)]
pub struct ParseBody {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlowchartResponse {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub positions: Layout,
}

impl From<Flowchart> for FlowchartResponse {
    fn from(chart: Flowchart) -> Self {
        let positions = layout(&chart.nodes, &chart.edges);
        Self { nodes: chart.nodes, edges: chart.edges, positions }
    }
}

/// `POST /api/flowchart`: generate and lay out a flowchart.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<FlowchartResponse>, Response> {
    let Json(body) = payload.map_err(|e| error_response(&invalid_body(&e)))?;
    let chart = run_generation(&state, &body.problem)
        .await
        .map_err(|e| error_response(&e))?;
    Ok(Json(chart.into()))
}

/// `POST /api/flowchart/svg`: generate a flowchart and render it as SVG.
pub async fn generate_svg(
    State(state): State<AppState>,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(e) => return error_response(&invalid_body(&e)),
    };
    match run_generation(&state, &body.problem).await {
        Ok(chart) => {
            let positions = layout(&chart.nodes, &chart.edges);
            ([(CONTENT_TYPE, "image/svg+xml")], render_svg(&chart, &positions)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// `POST /api/flowchart/parse`: build and lay out already-generated step text.
pub async fn parse_steps(payload: Result<Json<ParseBody>, JsonRejection>) -> Result<Json<FlowchartResponse>, Response> {
    let Json(body) = payload.map_err(|e| error_response(&invalid_body(&e)))?;
    let chart = parse_and_build(&body.text).map_err(|e| error_response(&FlowchartError::Validation(e)))?;
    Ok(Json(chart.into()))
}

async fn run_generation(state: &AppState, problem: &str) -> Result<Flowchart, FlowchartError> {
    // Blank input never queues behind an in-flight generation.
    ensure_problem(problem)?;
    let Some(generator) = state.generator.as_ref() else {
        return Err(FlowchartError::NotConfigured);
    };
    let _turn = state.generation_lock.lock().await;
    generate_flowchart(generator.as_ref(), problem).await
}

pub(crate) fn flowchart_error_to_status(err: &FlowchartError) -> StatusCode {
    match err {
        FlowchartError::EmptyPrompt | FlowchartError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        FlowchartError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        FlowchartError::Backend(_) => StatusCode::BAD_GATEWAY,
        FlowchartError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn invalid_body(rejection: &JsonRejection) -> FlowchartError {
    FlowchartError::InvalidBody(rejection.body_text())
}

fn error_response(err: &FlowchartError) -> Response {
    let body = serde_json::json!({
        "error": GENERIC_FAILURE,
        "code": err.error_code(),
        "message": err.to_string(),
        "retryable": err.retryable(),
    });
    (flowchart_error_to_status(err), Json(body)).into_response()
}

#[cfg(test)]
#[path = "flowchart_test.rs"]
mod tests;
