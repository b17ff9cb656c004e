//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the generation pipeline so route handlers can stay
//! focused on protocol translation.

pub mod flowchart;
