//! LLM: text-generation backend adapter.
//!
//! DESIGN
//! ======
//! The flowchart pipeline only needs "prompt in, text out", expressed by the
//! [`TextGenerator`] trait. [`LlmClient`] is the production implementation,
//! built from an explicit [`LlmConfig`] and talking to a local Ollama server.

pub mod config;
pub mod ollama;
pub mod types;

use config::LlmConfig;
pub use types::TextGenerator;
use types::LlmError;

// =============================================================================
// CLIENT
// =============================================================================

/// Configured text generator backed by Ollama.
pub struct LlmClient {
    inner: ollama::OllamaClient,
    model: String,
}

impl LlmClient {
    /// Build a client from environment variables. See [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env())
    }

    /// Build a client from a typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = ollama::OllamaClient::new(&config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    /// Return the configured model name (e.g. `"phi3"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Names of the models the backend has available.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        self.inner.list_models().await
    }
}

#[async_trait::async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.inner.generate(&self.model, prompt).await
    }
}
