//! Flowchart graph types.

use serde::{Deserialize, Serialize};

/// Branch marker on a step: `(Yes)`, `(No)` or `(Else)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchTag {
    Yes,
    No,
    Else,
}

impl BranchTag {
    /// Case-insensitive match against the tag text inside the parentheses.
    #[must_use]
    pub fn from_tag(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "else" => Some(Self::Else),
            _ => None,
        }
    }

    /// Capitalized edge label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Else => "Else",
        }
    }
}

/// One recognized numbered line, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Numeral token exactly as written. Not unique, not sequential.
    pub id: String,
    pub branch: Option<BranchTag>,
    pub text: String,
    pub raw_line: String,
}

/// Node kind, derived once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    End,
    Decision,
    Process,
}

/// A classified flowchart vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Only consulted while edges are built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchTag>,
}

/// A directed, optionally labelled connection between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<BranchTag>,
}

/// Parsed graph for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flowchart {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// A node with its center coordinates and box height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: Node,
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

/// Layout result keyed by node id.
pub type Layout = std::collections::HashMap<String, PositionedNode>;
