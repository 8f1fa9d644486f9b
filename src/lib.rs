//! Glint is the rendering core of a terminal chat client for AI models.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the transcript [`core::buffer::TextBuffer`], message
//!   types, configuration and the hand-off between worker tasks and the
//!   render thread.
//! - [`ui`] holds the markdown scanners, the [`ui::markdown::RenderEngine`]
//!   that lays named styles over the buffer, themes that resolve those names,
//!   and the terminal presentation of the result.
//! - [`utils`] provides the clipboard used by code block copy actions.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
