use super::*;
use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use tower::ServiceExt;

use crate::state::test_helpers::{self, EVEN_ODD_STEPS};

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_ok() {
    let app = app(test_helpers::test_app_state());
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn flowchart_route_returns_nodes_edges_positions() {
    let app = app(test_helpers::test_app_state_with_text(EVEN_ODD_STEPS));
    let response = app
        .oneshot(post_json("/api/flowchart", &serde_json::json!({ "problem": "even or odd" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["nodes"].as_array().unwrap().len(), 6);
    assert_eq!(body["nodes"][2]["kind"], "decision");
    assert_eq!(body["nodes"][2]["label"], "Is number even?");
    assert_eq!(body["positions"]["4"]["x"], 320.0);
    assert_eq!(body["positions"]["5"]["x"], 680.0);
    assert_eq!(body["positions"]["4"]["kind"], "process");
}

#[tokio::test]
async fn flowchart_route_blank_problem_is_400() {
    let app = app(test_helpers::test_app_state_with_text(EVEN_ODD_STEPS));
    let response = app
        .oneshot(post_json("/api/flowchart", &serde_json::json!({ "problem": "  " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Error generating flowchart");
    assert_eq!(body["code"], "E_EMPTY_PROMPT");
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn flowchart_route_invalid_model_output_is_422() {
    let app = app(test_helpers::test_app_state_with_text("I cannot draw flowcharts."));
    let response = app
        .oneshot(post_json("/api/flowchart", &serde_json::json!({ "problem": "even or odd" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["code"], "E_INVALID_STEP_LIST");
    assert!(body["message"].as_str().unwrap().contains("valid step list"));
}

#[tokio::test]
async fn flowchart_route_backend_failure_is_retryable_502() {
    let app = app(test_helpers::test_app_state_failing());
    let response = app
        .oneshot(post_json("/api/flowchart", &serde_json::json!({ "problem": "even or odd" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = json_body(response).await;
    assert_eq!(body["code"], "E_API_REQUEST");
    assert_eq!(body["retryable"], true);
    assert!(body["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn svg_route_renders_document() {
    let app = app(test_helpers::test_app_state_with_text(EVEN_ODD_STEPS));
    let response = app
        .oneshot(post_json("/api/flowchart/svg", &serde_json::json!({ "problem": "even or odd" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let svg = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Is number even?"));
}

#[tokio::test]
async fn parse_route_needs_no_generator() {
    let app = app(test_helpers::test_app_state());
    let response = app
        .oneshot(post_json("/api/flowchart/parse", &serde_json::json!({ "text": "1. Start\n2. Work\n3. End" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["edges"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn flowchart_route_missing_field_is_invalid_body() {
    let app = app(test_helpers::test_app_state_with_text(EVEN_ODD_STEPS));
    let response = app
        .oneshot(post_json("/api/flowchart", &serde_json::json!({ "prompt": "even or odd" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Error generating flowchart");
    assert_eq!(body["code"], "E_INVALID_BODY");
    assert_eq!(body["retryable"], false);
    assert!(body["message"].as_str().unwrap().contains("problem"));
}

#[tokio::test]
async fn parse_route_malformed_json_is_invalid_body() {
    let app = app(test_helpers::test_app_state());
    let request = Request::builder()
        .method("POST")
        .uri("/api/flowchart/parse")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "E_INVALID_BODY");
}

#[tokio::test]
async fn svg_route_without_json_content_type_is_invalid_body() {
    let app = app(test_helpers::test_app_state_with_text(EVEN_ODD_STEPS));
    let request = Request::builder()
        .method("POST")
        .uri("/api/flowchart/svg")
        .body(Body::from("{\"problem\": \"even or odd\"}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "E_INVALID_BODY");
}
