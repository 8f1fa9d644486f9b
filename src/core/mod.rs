pub mod buffer;
pub mod config;
pub mod handoff;
pub mod message;
