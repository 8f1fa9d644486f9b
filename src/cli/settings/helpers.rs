//! Helper functions for settings operations.

use crate::core::config::data::Config;
use crate::ui::builtin_themes::find_builtin_theme;

use super::error::SettingError;

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Format a boolean value for display.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Validate and resolve a theme identifier.
///
/// Checks both built-in and custom themes, returning the canonical theme ID.
pub fn validate_theme(config: &Config, input: &str) -> Result<String, SettingError> {
    if let Some(theme) = config.get_custom_theme(input) {
        return Ok(theme.id.clone());
    }

    if let Some(theme) = find_builtin_theme(input) {
        return Ok(theme.id);
    }

    Err(SettingError::UnknownTheme {
        input: input.to_string(),
    })
}

pub fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

pub fn success_unset(key: &str) -> String {
    format!("✅ Unset {key}")
}
