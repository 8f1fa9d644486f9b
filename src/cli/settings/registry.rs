//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{
    dark_theme_handler, light_theme_handler, markdown_handler, sender_labels_handler,
    timestamps_handler, TableRowLimitHandler, ThemeHandler,
};
use super::{SettingError, SettingHandler};
use crate::core::config::data::Config;

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for `glint set` output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        // Register handlers in display order
        registry.register(Box::new(ThemeHandler));
        registry.register(Box::new(light_theme_handler()));
        registry.register(Box::new(dark_theme_handler()));
        registry.register(Box::new(markdown_handler()));
        registry.register(Box::new(timestamps_handler()));
        registry.register(Box::new(sender_labels_handler()));
        registry.register(Box::new(TableRowLimitHandler));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    /// Get a handler by key.
    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    /// Get all keys in display order.
    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }

    pub fn set(&self, key: &str, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        self.get(key)
            .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?
            .set(args, config)
    }

    pub fn unset(&self, key: &str, config: &mut Config) -> Result<String, SettingError> {
        self.get(key)
            .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?
            .unset(config)
    }

    /// One formatted line per key, in display order.
    pub fn describe(&self, config: &Config) -> Vec<String> {
        self.display_order
            .iter()
            .filter_map(|key| self.get(key))
            .map(|handler| handler.format(config))
            .collect()
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CustomTheme;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn boolean_settings_round_trip() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();

        let msg = registry
            .set("markdown", &args(&["off"]), &mut config)
            .expect("set markdown");
        assert_eq!(msg, "✅ Set markdown to: off");
        assert_eq!(config.markdown, Some(false));
        assert!(!config.render_context().markdown_enabled);

        registry.unset("markdown", &mut config).expect("unset");
        assert_eq!(config.markdown, None);
        assert!(config.render_context().markdown_enabled);
    }

    #[test]
    fn invalid_boolean_is_rejected() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();
        let err = registry
            .set("timestamps", &args(&["maybe"]), &mut config)
            .unwrap_err();
        assert!(matches!(err, SettingError::InvalidBoolean(ref v) if v == "maybe"));
        assert_eq!(config.timestamps, None);
    }

    #[test]
    fn theme_accepts_only_dark_or_light() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();
        registry
            .set("theme", &args(&["Dark"]), &mut config)
            .expect("set theme");
        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert!(config.prefers_dark());

        let err = registry
            .set("theme", &args(&["sepia"]), &mut config)
            .unwrap_err();
        assert!(matches!(err, SettingError::InvalidValue { key: "theme", .. }));
    }

    #[test]
    fn palette_settings_validate_theme_ids() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();
        config.add_custom_theme(CustomTheme {
            id: "paper".into(),
            display_name: "Paper".into(),
            dark: Some(false),
            background: None,
            styles: Default::default(),
        });

        registry
            .set("dark-theme", &args(&["DRACULA"]), &mut config)
            .expect("builtin id");
        assert_eq!(config.dark_theme.as_deref(), Some("dracula"));
        registry
            .set("light-theme", &args(&["Paper"]), &mut config)
            .expect("custom id");
        assert_eq!(config.light_theme.as_deref(), Some("paper"));

        let err = registry
            .set("light-theme", &args(&["nope"]), &mut config)
            .unwrap_err();
        assert!(matches!(err, SettingError::UnknownTheme { .. }));
    }

    #[test]
    fn row_limit_must_be_positive() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();
        registry
            .set("table-row-limit", &args(&["20"]), &mut config)
            .expect("set limit");
        assert_eq!(config.table_row_limit(), 20);
        assert!(registry
            .set("table-row-limit", &args(&["0"]), &mut config)
            .is_err());
        assert!(registry
            .set("table-row-limit", &[], &mut config)
            .is_err_and(|e| e.exit_code() == 2));
    }

    #[test]
    fn unknown_key_is_reported() {
        let registry = SettingRegistry::new();
        let mut config = Config::default();
        let err = registry.unset("syntax", &mut config).unwrap_err();
        assert_eq!(err.to_string(), "Unknown config key: syntax");
    }

    #[test]
    fn describe_lists_every_key() {
        let registry = SettingRegistry::new();
        let lines = registry.describe(&Config::default());
        assert_eq!(lines.len(), registry.keys_display_order().len());
        assert_eq!(lines[0], "  theme: (unset, default: light)");
        assert!(lines
            .iter()
            .any(|l| l == "  table-row-limit: (unset, default: 50)"));
    }
}
