//! Numbered step list → flowchart graph.
//!
//! The model is asked for lines like `3. Decision: Is it even?` and
//! `4. (Yes) Print "Even"`. Anything that does not look like a numbered line
//! is noise and is dropped without complaint.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::ast::{BranchTag, Edge, Flowchart, Node, NodeKind, Step};

/// Minimum number of numbered lines for a usable chart.
pub const MIN_STEPS: usize = 2;

static STEP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\.\s*(?:\((yes|no|else)\))?\s*(.*)").expect("step line pattern is valid")
});

/// Fewer than [`MIN_STEPS`] numbered lines were recovered from the text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model did not return a valid step list ({found} numbered lines, need {MIN_STEPS})")]
pub struct ValidationError {
    pub found: usize,
}

impl crate::error::ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        "E_INVALID_STEP_LIST"
    }
}

/// Parse generated text into nodes and edges.
///
/// # Errors
///
/// Returns [`ValidationError`] when fewer than two numbered lines are found.
pub fn parse_and_build(raw_text: &str) -> Result<Flowchart, ValidationError> {
    let steps = parse_steps(raw_text);
    if steps.len() < MIN_STEPS {
        return Err(ValidationError { found: steps.len() });
    }

    let nodes: Vec<Node> = steps.into_iter().map(classify).collect();
    let edges = build_edges(&nodes);
    debug!(nodes = nodes.len(), edges = edges.len(), "flowchart: graph built");

    Ok(Flowchart { nodes, edges })
}

/// Extract every numbered line, in order.
#[must_use]
pub fn parse_steps(raw_text: &str) -> Vec<Step> {
    raw_text
        .lines()
        .filter_map(|line| {
            let step = parse_step_line(line);
            if step.is_none() && !line.trim().is_empty() {
                debug!(line, "flowchart: skipping non-step line");
            }
            step
        })
        .collect()
}

fn parse_step_line(line: &str) -> Option<Step> {
    let caps = STEP_LINE.captures(line)?;
    let id = caps.get(1)?.as_str().to_owned();
    let branch = caps.get(2).and_then(|m| BranchTag::from_tag(m.as_str()));
    let text = caps.get(3).map_or("", |m| m.as_str()).trim().to_owned();
    Some(Step { id, branch, text, raw_line: line.to_owned() })
}

/// Assign a node kind and display label. First rule that matches wins.
#[must_use]
pub fn classify(step: Step) -> Node {
    let lower = step.text.to_lowercase();
    let (kind, label) = if lower.contains("start") {
        (NodeKind::Start, "Start".to_owned())
    } else if lower.contains("end") {
        (NodeKind::End, "End".to_owned())
    } else if lower.starts_with("decision") || step.text.contains('?') {
        (NodeKind::Decision, step.text.replace("Decision:", "").trim().to_owned())
    } else {
        (NodeKind::Process, step.text)
    };
    trace!(id = %step.id, ?kind, raw = %step.raw_line, "flowchart: step classified");

    Node { id: step.id, kind, label, branch: step.branch }
}

/// Link nodes in a single forward pass.
///
/// Untagged nodes continue from the node right before them, whatever its
/// kind. Tagged nodes hang off the nearest earlier decision, or get no
/// incoming edge if there is none. A plain line after a branch run therefore
/// links from the last branch line, not from the decision.
#[must_use]
pub fn build_edges(nodes: &[Node]) -> Vec<Edge> {
    let mut edges = Vec::new();
    let Some((first, rest)) = nodes.split_first() else {
        return edges;
    };

    let mut previous = first;
    for (offset, node) in rest.iter().enumerate() {
        let position = offset + 1;
        let link = match node.branch {
            Some(tag) => find_owning_decision(nodes, position).map(|decision| (decision, Some(tag))),
            None => Some((previous, None)),
        };

        if let Some((source, label)) = link {
            edges.push(Edge { from: source.id.clone(), to: node.id.clone(), label });
        }
        previous = node;
    }

    edges
}

/// Nearest decision strictly before `position`, scanning backward.
#[must_use]
pub fn find_owning_decision(nodes: &[Node], position: usize) -> Option<&Node> {
    nodes[..position.min(nodes.len())]
        .iter()
        .rev()
        .find(|n| n.kind == NodeKind::Decision)
}
