//! Ollama `/api/generate` client.
//!
//! Requests are sent with `stream: false`, but some server versions still
//! answer with newline-delimited JSON fragments, so the decoder accepts both
//! a single object and an NDJSON body.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{LlmError, body_snippet};

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Run one non-streaming completion and return the generated text.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-200 statuses, and bodies that carry no
    /// `response` text.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest { model, prompt, stream: false };
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        decode_generate_body(&text)
    }

    /// List locally available model names via `/api/tags`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-200 statuses, or a non-JSON body.
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        parse_tags_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Decode a `/api/generate` body into the generated text.
///
/// A whole-body JSON object with a string `response` wins. Otherwise each
/// non-blank line is read as its own JSON object and the `response` fields
/// are concatenated in order; lines that are not JSON are skipped.
///
/// # Errors
///
/// Returns [`LlmError::ApiParse`] with the start of the body when neither
/// shape yields any `response` field.
pub(crate) fn decode_generate_body(body: &str) -> Result<String, LlmError> {
    if let Ok(Value::Object(root)) = serde_json::from_str::<Value>(body) {
        if let Some(text) = root.get("response").and_then(Value::as_str) {
            return Ok(text.to_owned());
        }
    }

    let mut fragments = Vec::new();
    for line in body.trim().lines().filter(|l| !l.trim().is_empty()) {
        let Ok(value) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        if let Some(text) = value.get("response").and_then(Value::as_str) {
            fragments.push(text.to_owned());
        }
    }

    if fragments.is_empty() {
        return Err(LlmError::ApiParse(format!("no response text in body; raw snippet: {}", body_snippet(body))));
    }
    Ok(fragments.concat())
}

pub(crate) fn parse_tags_response(body: &str) -> Result<Vec<String>, LlmError> {
    let root: Value = serde_json::from_str(body).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let names = root
        .get("models")
        .and_then(Value::as_array)
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m.get("name").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    Ok(names)
}

#[cfg(test)]
#[path = "ollama_test.rs"]
mod tests;
