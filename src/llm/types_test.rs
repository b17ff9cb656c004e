use super::*;
use crate::error::ErrorCode;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_api_request() {
    let err = LlmError::ApiRequest("timeout".into());
    assert_eq!(err.error_code(), "E_API_REQUEST");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn api_response_message_carries_body() {
    let err = LlmError::ApiResponse { status: 404, body: r#"{"error":"model 'phi3' not found"}"#.into() };
    let message = err.to_string();
    assert!(message.contains("status 404"));
    assert!(message.contains("model 'phi3' not found"));
}

#[test]
fn api_response_message_truncates_long_body() {
    let body = format!("{}{}", "a".repeat(BODY_SNIPPET_CHARS), "TAIL");
    let err = LlmError::ApiResponse { status: 500, body };
    let message = err.to_string();
    assert!(message.ends_with(&"a".repeat(BODY_SNIPPET_CHARS)));
    assert!(!message.contains("TAIL"));
}

#[test]
fn error_code_api_parse() {
    let err = LlmError::ApiParse("json".into());
    assert_eq!(err.error_code(), "E_API_PARSE");
}

#[test]
fn error_code_http_client_build() {
    let err = LlmError::HttpClientBuild("tls".into());
    assert_eq!(err.error_code(), "E_HTTP_CLIENT_BUILD");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    let err = LlmError::ApiRequest("conn refused".into());
    assert!(err.retryable());
}

#[test]
fn retryable_api_response_429_and_5xx() {
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 404, body: "model not found".into() }.retryable());
    assert!(!LlmError::ApiParse("bad body".into()).retryable());
    assert!(!LlmError::HttpClientBuild("tls".into()).retryable());
}

#[test]
fn display_includes_status() {
    let err = LlmError::ApiResponse { status: 502, body: String::new() };
    assert_eq!(err.to_string(), "API response error: status 502");
}
