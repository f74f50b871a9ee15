//! Report rendering
//!
//! Turns fully-computed ledgers and merge rows into the HTML mail body, the
//! plain-text fallback, and a terminal preview. Rendering is stateless and
//! never mutates its inputs.

pub mod html;
pub mod style;
pub mod text;

pub use html::{render_breakdown_table, render_document, render_summary_table, BreakdownSection};
pub use text::{render_summary_text, render_text_fallback};
