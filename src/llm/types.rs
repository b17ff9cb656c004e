//! LLM types: backend errors and the text generation seam.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by the text-generation backend.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request to the backend failed (connect, timeout, body read).
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The backend returned a non-success HTTP status.
    #[error("API response error: status {status}: {}", body_snippet(.body))]
    ApiResponse { status: u16, body: String },

    /// The response body could not be decoded into text.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// How much of a backend body is carried in error messages.
pub(crate) const BODY_SNIPPET_CHARS: usize = 200;

/// First [`BODY_SNIPPET_CHARS`] characters of a backend body.
pub(crate) fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// TEXT GENERATOR TRAIT
// =============================================================================

/// Opaque prompt-in, text-out backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the call cannot be completed or its
    /// response cannot be decoded into text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
