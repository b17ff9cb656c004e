//! Flowchart service: problem statement → prompt → step text → graph.
//!
//! DESIGN
//! ======
//! The model is asked for a plain numbered list only. All structure (node
//! kinds, edges) is recovered locally by `crate::flowchart::parse`, so nothing
//! the model emits is ever trusted as JSON. Backend failures pass through
//! unchanged; the service never retries.

use std::fmt::Write;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::flowchart::ast::Flowchart;
use crate::flowchart::{ValidationError, parse_and_build};
use crate::llm::TextGenerator;
use crate::llm::types::LlmError;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FlowchartError {
    #[error("problem statement is empty")]
    EmptyPrompt,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("text generator not configured")]
    NotConfigured,
    #[error("backend error: {0}")]
    Backend(#[from] LlmError),
    #[error("invalid output: {0}")]
    Validation(#[from] ValidationError),
}

impl ErrorCode for FlowchartError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "E_EMPTY_PROMPT",
            Self::InvalidBody(_) => "E_INVALID_BODY",
            Self::NotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::Backend(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Backend(e) if e.retryable())
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// Wrap a problem statement in the numbered-list instructions.
#[must_use]
pub fn build_prompt(problem: &str) -> String {
    let mut prompt = String::from(
        "Return ONLY a numbered list of flowchart steps.\n\
         Do NOT explain.\n\
         Do NOT output JSON.\n\
         Do NOT use markdown.\n\n\
         Rules:\n\
         1. Each line MUST start with a number and a dot.\n\
         2. For DECISIONS, use the format: \"StepNumber. Decision: Question?\"\n\
         3. For BRANCHES, use the format: \"StepNumber. (Yes) Action\" or \"StepNumber. (No) Action\" or \"StepNumber. (Else) Action\"\n\
         4. For normal steps, just \"StepNumber. Action\"\n\
         5. End the process with \"End\"\n\n",
    );
    let _ = writeln!(prompt, "Problem:\n{}\n", problem.trim());
    prompt.push_str(
        "Example:\n\
         1. Start\n\
         2. Input number\n\
         3. Decision: Is number even?\n\
         4. (Yes) Print \"Even\"\n\
         5. (No) Print \"Odd\"\n\
         6. End\n",
    );
    prompt
}

/// Reject a blank (whitespace-only) problem statement.
///
/// # Errors
///
/// Returns [`FlowchartError::EmptyPrompt`] when nothing but whitespace was sent.
pub fn ensure_problem(problem: &str) -> Result<(), FlowchartError> {
    if problem.trim().is_empty() {
        return Err(FlowchartError::EmptyPrompt);
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Generate a flowchart graph for a problem statement.
///
/// # Errors
///
/// Fails on a blank problem, a backend failure, or generated text with fewer
/// than two numbered steps. No partial graph is ever returned.
pub async fn generate_flowchart(generator: &dyn TextGenerator, problem: &str) -> Result<Flowchart, FlowchartError> {
    ensure_problem(problem)?;

    let request_id = Uuid::new_v4();
    info!(%request_id, prompt_len = problem.len(), "flowchart: generation requested");

    let prompt = build_prompt(problem);
    let raw_text = generator.generate(&prompt).await.map_err(|e| {
        warn!(%request_id, error = %e, "flowchart: backend call failed");
        FlowchartError::Backend(e)
    })?;

    let chart = parse_and_build(&raw_text).map_err(|e| {
        warn!(%request_id, found = e.found, "flowchart: model output rejected");
        FlowchartError::Validation(e)
    })?;

    info!(%request_id, nodes = chart.nodes.len(), edges = chart.edges.len(), "flowchart: graph built");
    Ok(chart)
}

#[cfg(test)]
#[path = "flowchart_test.rs"]
mod tests;
