//! SVG rendering of a laid-out flowchart.

use std::fmt::Write;

use super::ast::{BranchTag, Flowchart, Layout, NodeKind};
use super::layout::{LINE_HEIGHT, MIN_NODE_HEIGHT, WRAP_WIDTH, wrap_label};

const CANVAS_MARGIN_X: f64 = 100.0;
const CANVAS_MARGIN_BOTTOM: f64 = 150.0;
const MIN_CANVAS_W: f64 = 1000.0;
const EDGE_INSET: f64 = 35.0;
const TERMINAL_W: f64 = 160.0;
const PROCESS_W: f64 = 180.0;
const DECISION_HALF_W: f64 = 100.0;

const BACKGROUND: &str = "#0e1117";
const EDGE_NEUTRAL: &str = "#a0a0a0";
const EDGE_YES: &str = "#4caf50";
const EDGE_NO: &str = "#ff5252";
const STROKE_TERMINAL: &str = "#f6e05e";
const STROKE_DECISION: &str = "#ff79c6";
const STROKE_PROCESS: &str = "#4fd1c5";

/// Render the chart as a standalone SVG document.
///
/// Edges whose endpoints have no position are skipped.
#[must_use]
pub fn render_svg(chart: &Flowchart, layout: &Layout) -> String {
    let (min_x, max_x, max_y) = bounds(layout);
    let x_offset = (-min_x).max(0.0);
    let width = MIN_CANVAS_W.max(max_x - min_x) + x_offset;
    let height = max_y + CANVAS_MARGIN_BOTTOM;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" style="font-family: 'Segoe UI', sans-serif; background: {BACKGROUND}">"##
    );
    svg.push_str(DEFS);

    for edge in &chart.edges {
        let (Some(from), Some(to)) = (layout.get(&edge.from), layout.get(&edge.to)) else {
            continue;
        };
        let (x1, y1) = (from.x + x_offset, from.y);
        let (x2, y2) = (to.x + x_offset, to.y);
        let color = edge_color(edge.label);
        let _ = write!(
            svg,
            r#"<line x1="{x1}" y1="{}" x2="{x2}" y2="{}" stroke="{color}" stroke-width="2" marker-end="url(#arrow)"/>"#,
            y1 + EDGE_INSET,
            y2 - EDGE_INSET,
        );
        if let Some(tag) = edge.label {
            let (mx, my) = (f64::midpoint(x1, x2), f64::midpoint(y1, y2));
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="30" height="20" fill="{BACKGROUND}" rx="4"/><text x="{mx}" y="{}" fill="{color}" text-anchor="middle" font-size="11" font-weight="bold">{}</text>"#,
                mx - 15.0,
                my - 10.0,
                my + 4.0,
                tag.label(),
            );
        }
    }

    for node in &chart.nodes {
        let Some(pos) = layout.get(&node.id) else {
            continue;
        };
        let (x, y) = (pos.x + x_offset, pos.y);
        let lines = wrap_label(&node.label, WRAP_WIDTH);
        #[allow(clippy::cast_precision_loss)]
        let line_count = lines.len() as f64;
        let box_h = MIN_NODE_HEIGHT + line_count * LINE_HEIGHT;

        match node.kind {
            NodeKind::Start | NodeKind::End => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" rx="25" ry="25" width="{TERMINAL_W}" height="{box_h}" stroke="{STROKE_TERMINAL}" stroke-width="2" fill="url(#nodeGrad)" filter="url(#glow)"/>"#,
                    x - TERMINAL_W / 2.0,
                    y - box_h / 2.0,
                );
            }
            NodeKind::Decision => {
                let _ = write!(
                    svg,
                    r#"<path d="M{x},{} L{},{y} L{x},{} L{},{y} Z" stroke="{STROKE_DECISION}" stroke-width="2" fill="url(#nodeGrad)"/>"#,
                    y - box_h / 2.0 - 10.0,
                    x + DECISION_HALF_W,
                    y + box_h / 2.0 + 10.0,
                    x - DECISION_HALF_W,
                );
            }
            NodeKind::Process => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" rx="6" width="{PROCESS_W}" height="{box_h}" stroke="{STROKE_PROCESS}" stroke-width="2" fill="url(#nodeGrad)"/>"#,
                    x - PROCESS_W / 2.0,
                    y - box_h / 2.0,
                );
            }
        }

        let first_y = y - ((line_count - 1.0) * LINE_HEIGHT) / 2.0 + 5.0;
        for (i, line) in lines.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let line_y = first_y + i as f64 * LINE_HEIGHT;
            let _ = write!(
                svg,
                r#"<text x="{x}" y="{line_y}" fill="white" text-anchor="middle" font-size="14" font-weight="500">{}</text>"#,
                escape_xml(line),
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

const DEFS: &str = r##"<defs><marker id="arrow" markerWidth="12" markerHeight="12" refX="10" refY="3" orient="auto" markerUnits="strokeWidth"><path d="M0,0 L0,6 L9,3 z" fill="#a0a0a0"/></marker><filter id="glow" x="-20%" y="-20%" width="140%" height="140%"><feGaussianBlur stdDeviation="2" result="blur"/><feComposite in="SourceGraphic" in2="blur" operator="over"/></filter><linearGradient id="nodeGrad" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" style="stop-color:#2b313e;stop-opacity:1"/><stop offset="100%" style="stop-color:#1e2330;stop-opacity:1"/></linearGradient></defs>"##;

fn edge_color(label: Option<BranchTag>) -> &'static str {
    match label {
        Some(BranchTag::Yes) => EDGE_YES,
        Some(BranchTag::No) => EDGE_NO,
        Some(BranchTag::Else) | None => EDGE_NEUTRAL,
    }
}

/// `(min_x - margin, max_x + margin, max_y)` with the renderer's defaults for
/// an empty layout.
fn bounds(layout: &Layout) -> (f64, f64, f64) {
    if layout.is_empty() {
        return (-CANVAS_MARGIN_X, MIN_CANVAS_W + CANVAS_MARGIN_X, 800.0);
    }
    let min_x = layout.values().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = layout.values().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = layout.values().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    (min_x - CANVAS_MARGIN_X, max_x + CANVAS_MARGIN_X, max_y)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
