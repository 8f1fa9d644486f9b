//! Markdown-aware rendering of transcript messages.
//!
//! [`RenderEngine`] drives the scanners in this module over each message:
//! [`fence`] finds code blocks, [`python`] highlights Python inside them,
//! [`table`] turns pipe tables into box-drawing grids and [`inline`] handles
//! emphasis, code spans, links and headings on the remaining lines.

pub mod copy;
pub mod fence;
pub mod inline;
pub mod python;
pub mod render;
pub mod table;

#[cfg(test)]
mod tests;

pub use copy::{CopyHandle, CopyOutcome, CopyRegistry, COPY_ACK_WINDOW};
pub use fence::{scan_fences, FenceLanguage, FencedBlock};
pub use render::{CopyAffordance, MessageRegion, RenderContext, RenderEngine, RenderPhase};
pub use table::{scan_tables, Table, TableRegion};
