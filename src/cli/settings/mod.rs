//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a [`SettingHandler`]. Handlers edit a loaded
//! [`Config`] in memory; the caller decides when to persist it.
//!
//! - Theme settings (`theme`, `light-theme`, `dark-theme`)
//! - Boolean settings (`markdown`, `timestamps`, `sender-labels`)
//! - Numeric settings (`table-row-limit`)

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the value from the words given after the key.
    ///
    /// Returns a success message to display.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value so the default applies again.
    fn unset(&self, config: &mut Config) -> Result<String, SettingError>;

    /// Format the current value for display in `glint set` output.
    fn format(&self, config: &Config) -> String;
}
