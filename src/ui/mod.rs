//! Presentation layer for rendered transcripts.
//!
//! - [`span`] names the styles laid over the buffer.
//! - [`theme`] and [`builtin_themes`] resolve those names to attributes.
//! - [`markdown`] holds the scanners and the [`markdown::RenderEngine`].
//! - [`renderer`] and [`ansi`] turn the engine's output into terminal lines.

pub mod ansi;
pub mod builtin_themes;
pub mod markdown;
pub mod renderer;
pub mod span;
pub mod theme;
