//! Numbered step list parser and tree layout engine.
//!
//! Turns the free-form numbered list a model produces into a typed graph of
//! start/end/decision/process nodes, then positions that graph top-down from
//! its start node so it can be drawn without rows overlapping.

pub mod ast;
pub mod layout;
pub mod parse;
pub mod svg;

pub use layout::layout;
pub use parse::{ValidationError, parse_and_build};
pub use svg::render_svg;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
