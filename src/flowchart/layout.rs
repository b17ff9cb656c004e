//! Layout engine: breadth-first placement of a flowchart from its root.
//!
//! Every node gets a center `(x, y)` and a box height. Single children stack
//! straight down; fan-outs spread Yes to the left and No to the right. Nodes
//! the traversal never reaches are stacked in a column below everything else.

use std::collections::{HashMap, HashSet, VecDeque};

use super::ast::{BranchTag, Edge, Layout, Node, NodeKind, PositionedNode};

// Layout constants (in pixels).
pub const ROOT_X: f64 = 500.0;
pub const ROOT_TOP: f64 = 50.0;
pub const ROW_GAP: f64 = 60.0;
pub const BRANCH_OFFSET: f64 = 180.0;
pub const FALLBACK_GAP: f64 = 100.0;
pub const WRAP_WIDTH: usize = 20;
pub const LINE_HEIGHT: f64 = 18.0;
pub const MIN_NODE_HEIGHT: f64 = 40.0;

/// Position every node. Never fails.
///
/// Node ids are the join key. When ids repeat, the last node with a given id
/// wins every lookup, and the layout holds one entry per distinct id.
#[must_use]
pub fn layout(nodes: &[Node], edges: &[Edge]) -> Layout {
    let mut positions = Layout::new();
    let Some(root) = nodes
        .iter()
        .find(|n| n.kind == NodeKind::Start)
        .or_else(|| nodes.first())
    else {
        return positions;
    };

    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut children: HashMap<&str, Vec<&Edge>> = HashMap::new();
    for edge in edges {
        if by_id.contains_key(edge.from.as_str()) {
            children.entry(edge.from.as_str()).or_default().push(edge);
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<(&str, f64, f64)> = VecDeque::new();
    queue.push_back((root.id.as_str(), ROOT_X, ROOT_TOP));

    while let Some((id, center_x, top)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = by_id.get(id) else {
            continue;
        };

        let height = node_height(&node.label);
        positions.insert(
            node.id.clone(),
            PositionedNode { node: (*node).clone(), x: center_x, y: top + height / 2.0, height },
        );

        let outgoing = children.get(id).map_or(&[][..], Vec::as_slice);
        let next_top = top + height + ROW_GAP;
        match outgoing {
            [] => {}
            [only] => queue.push_back((only.to.as_str(), center_x, next_top)),
            many => {
                for (index, edge) in many.iter().enumerate() {
                    let x = center_x + fan_out_offset(edge.label, index);
                    queue.push_back((edge.to.as_str(), x, next_top));
                }
            }
        }
    }

    place_unreached(nodes, &visited, &mut positions);
    positions
}

/// Horizontal offset of a fan-out child. Only two slots exist, so three or
/// more siblings overlap.
fn fan_out_offset(label: Option<BranchTag>, index: usize) -> f64 {
    match label {
        Some(BranchTag::Yes) => -BRANCH_OFFSET,
        Some(BranchTag::No) => BRANCH_OFFSET,
        Some(BranchTag::Else) | None if index == 0 => -BRANCH_OFFSET,
        Some(BranchTag::Else) | None => BRANCH_OFFSET,
    }
}

/// Stack unreached nodes at `ROOT_X` below the lowest placed box, in input order.
fn place_unreached(nodes: &[Node], visited: &HashSet<&str>, positions: &mut Layout) {
    let mut bottom = positions
        .values()
        .map(|p| p.y + p.height / 2.0)
        .fold(None, |acc: Option<f64>, b| Some(acc.map_or(b, |a| a.max(b))))
        .unwrap_or(0.0);

    for node in nodes {
        if visited.contains(node.id.as_str()) {
            continue;
        }
        let height = node_height(&node.label);
        positions.insert(
            node.id.clone(),
            PositionedNode { node: node.clone(), x: ROOT_X, y: bottom + FALLBACK_GAP, height },
        );
        bottom += height + FALLBACK_GAP;
    }
}

/// Box height for a label: 40 plus 18 per wrapped line.
#[must_use]
pub fn node_height(label: &str) -> f64 {
    let lines = wrap_label(label, WRAP_WIDTH).len();
    #[allow(clippy::cast_precision_loss)]
    let height = MIN_NODE_HEIGHT + lines as f64 * LINE_HEIGHT;
    height
}

/// Greedy word wrap at `width` characters.
///
/// Text is cut into chunks: runs of spaces, and words split after hyphens
/// that sit between letters (`well-` + `formed`). Chunks fill each line in
/// order. A chunk wider than a whole line is split, breaking at its last
/// hyphen that fits when there is one, so the first piece fills whatever
/// room is left. Spaces are dropped at line ends and at the start of every
/// line after the first. Blank input yields no lines.
#[must_use]
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = split_chunks(&munge_whitespace(text));
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        let mut line: Vec<Vec<char>> = Vec::new();
        let mut line_len = 0;
        while let Some(chunk) = chunks.last() {
            if line_len + chunk.len() > width {
                break;
            }
            line_len += chunk.len();
            line.extend(chunks.pop());
        }

        if let Some(long) = chunks.last_mut().filter(|c| c.len() > width) {
            let end = long_chunk_cut(long, width - line_len);
            line.push(long.drain(..end).collect());
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat().into_iter().collect());
        }
    }
    lines
}

/// Expand tabs to 8-column stops and turn every whitespace character into a
/// plain space.
fn munge_whitespace(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = 8 - column % 8;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' | ' ' => {
                out.push(' ');
                column += 1;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

fn split_chunks(text: &[char]) -> Vec<Vec<char>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let blank = text[start] == ' ';
        let run = text[start..].iter().take_while(|&&c| (c == ' ') == blank).count();
        let piece = &text[start..start + run];
        if blank {
            chunks.push(piece.to_vec());
        } else {
            let mut word_start = 0;
            while word_start < piece.len() {
                let end = word_chunk_end(piece, word_start);
                chunks.push(piece[word_start..end].to_vec());
                word_start = end;
            }
        }
        start += run;
    }
    chunks
}

/// End of the chunk starting at `start` inside a space-free word.
fn word_chunk_end(word: &[char], start: usize) -> usize {
    // A dash run between a word and more word is a chunk of its own.
    if start > 0 && is_word_punct(word[start - 1]) {
        if let Some(end) = dash_run_end(word, start) {
            return end;
        }
    }
    for p in start + 1..word.len() {
        if word[p] == '-' && is_hyphen_break(word, p) {
            return p + 1;
        }
        if is_word_punct(word[p - 1]) && dash_run_end(word, p).is_some() {
            return p;
        }
    }
    word.len()
}

/// A hyphen at `p` allows a break after it when two letters (or a
/// letter-hyphen-letter) precede it and two letters, optionally
/// hyphen-separated, follow.
fn is_hyphen_break(word: &[char], p: usize) -> bool {
    let letter_at = |i: usize| word.get(i).is_some_and(|&c| is_letter(c));
    let before = (p >= 2 && letter_at(p - 2) && letter_at(p - 1))
        || (p >= 3 && letter_at(p - 3) && word[p - 2] == '-' && letter_at(p - 1));
    let after = letter_at(p + 1)
        && (letter_at(p + 2) || (word.get(p + 2) == Some(&'-') && letter_at(p + 3)));
    before && after
}

/// Two or more dashes at `p` followed by a word character.
fn dash_run_end(word: &[char], p: usize) -> Option<usize> {
    let dashes = word[p..].iter().take_while(|&&c| c == '-').count();
    let end = p + dashes;
    (dashes >= 2 && word.get(end).is_some_and(|&c| is_word_char(c))).then_some(end)
}

/// How much of an over-wide chunk goes on a line with `room` columns left.
fn long_chunk_cut(chunk: &[char], room: usize) -> usize {
    if chunk.len() > room {
        if let Some(hyphen) = chunk[..room].iter().rposition(|&c| c == '-') {
            if hyphen > 0 && chunk[..hyphen].iter().any(|&c| c != '-') {
                return hyphen + 1;
            }
        }
    }
    room
}

fn is_blank(chunk: &[char]) -> bool {
    chunk.iter().all(|&c| c == ' ')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_letter(c: char) -> bool {
    is_word_char(c) && !c.is_numeric()
}

fn is_word_punct(c: char) -> bool {
    is_word_char(c) || matches!(c, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}
