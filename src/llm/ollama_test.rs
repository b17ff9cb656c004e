use super::*;

// =============================================================================
// decode_generate_body
// =============================================================================

#[test]
fn decode_single_object() {
    let body = serde_json::json!({
        "model": "phi3",
        "created_at": "2024-05-01T10:00:00Z",
        "response": "1. Start\n2. End",
        "done": true
    })
    .to_string();
    assert_eq!(decode_generate_body(&body).unwrap(), "1. Start\n2. End");
}

#[test]
fn decode_ndjson_concatenates_fragments_in_order() {
    let body = concat!(
        r#"{"model":"phi3","response":"1. Start\n","done":false}"#,
        "\n",
        r#"{"model":"phi3","response":"2. ","done":false}"#,
        "\n",
        r#"{"model":"phi3","response":"End","done":false}"#,
        "\n",
        r#"{"model":"phi3","response":"","done":true}"#,
        "\n",
    );
    assert_eq!(decode_generate_body(body).unwrap(), "1. Start\n2. End");
}

#[test]
fn decode_single_and_ndjson_agree() {
    let single = r#"{"response":"1. Start\n2. End"}"#;
    let ndjson = "{\"response\":\"1. Start\\n\"}\n{\"response\":\"2. End\"}\n";
    assert_eq!(decode_generate_body(single).unwrap(), decode_generate_body(ndjson).unwrap());
}

#[test]
fn decode_ndjson_skips_broken_and_blank_lines() {
    let body = "{\"response\":\"a\"}\n\nnot json at all\n{\"done\":true}\n{\"response\":\"b\"}";
    assert_eq!(decode_generate_body(body).unwrap(), "ab");
}

#[test]
fn decode_rejects_body_without_response() {
    let err = decode_generate_body(r#"{"error":"model 'phi3' not found"}"#).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(ref msg) if msg.contains("model 'phi3' not found")));
}

#[test]
fn decode_rejects_html_with_truncated_snippet() {
    let body = format!("<html>{}</html>", "x".repeat(500));
    let err = decode_generate_body(&body).unwrap_err();
    let LlmError::ApiParse(msg) = err else {
        panic!("expected ApiParse");
    };
    assert!(msg.contains("<html>"));
    assert!(!msg.contains("</html>"));
    let snippet = msg.split("raw snippet: ").nth(1).unwrap();
    assert_eq!(snippet.chars().count(), 200);
}

#[test]
fn decode_empty_body_fails() {
    assert!(decode_generate_body("").is_err());
}

// =============================================================================
// parse_tags_response
// =============================================================================

#[test]
fn tags_lists_model_names() {
    let body = serde_json::json!({
        "models": [
            { "name": "phi3:latest", "size": 2_176_178_913_u64 },
            { "name": "llama3:8b" }
        ]
    })
    .to_string();
    assert_eq!(parse_tags_response(&body).unwrap(), vec!["phi3:latest", "llama3:8b"]);
}

#[test]
fn tags_without_models_is_empty() {
    assert!(parse_tags_response("{}").unwrap().is_empty());
}

#[test]
fn tags_rejects_non_json() {
    assert!(matches!(parse_tags_response("nope"), Err(LlmError::ApiParse(_))));
}

// =============================================================================
// client construction
// =============================================================================

#[test]
fn new_trims_trailing_slash() {
    let client = OllamaClient::new("http://localhost:11434/", LlmTimeouts::default()).unwrap();
    assert_eq!(client.base_url, "http://localhost:11434");
}

#[tokio::test]
async fn generate_against_closed_port_is_request_error() {
    let timeouts = LlmTimeouts { request_secs: 2, connect_secs: 1 };
    let client = OllamaClient::new("http://127.0.0.1:9", timeouts).unwrap();
    let err = client.generate("phi3", "hello").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
}
