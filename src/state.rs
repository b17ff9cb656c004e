//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the text generator (absent when the backend could not be
//! configured) and a lock that serializes generations: one backend call runs
//! at a time, later requests wait their turn.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm::TextGenerator;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub generation_lock: Arc<Mutex<()>>,
}

impl AppState {
    #[must_use]
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator, generation_lock: Arc::new(Mutex::new(())) }
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
