//! Theme selection handlers.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{success_set, success_unset, validate_theme};
use crate::cli::settings::SettingHandler;
use crate::core::config::data::Config;

/// Handler for the `theme` setting: which half of the pair is active.
pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the theme brightness, specify dark or light:",
                example: "glint set theme dark",
            });
        };

        let value = input.to_ascii_lowercase();
        if value != "dark" && value != "light" {
            return Err(SettingError::InvalidValue {
                key: "theme",
                input: input.clone(),
                expected: "dark or light",
            });
        }
        let message = success_set("theme", &value);
        config.theme = Some(value);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.theme = None;
        Ok(success_unset("theme"))
    }

    fn format(&self, config: &Config) -> String {
        match &config.theme {
            Some(theme) => format!("  theme: {theme}"),
            None => "  theme: (unset, default: light)".to_string(),
        }
    }
}

/// Handler for `light-theme` / `dark-theme`: the palette used for each half.
pub struct PaletteHandler {
    key: &'static str,
    example: &'static str,
    default_display: &'static str,
    get: fn(&Config) -> Option<&String>,
    set_field: fn(&mut Config, Option<String>),
}

impl SettingHandler for PaletteHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "Specify a built-in or custom theme id:",
                example: self.example,
            });
        }

        let theme = validate_theme(config, &args.join(" "))?;
        let message = success_set(self.key, &theme);
        (self.set_field)(config, Some(theme));
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        (self.set_field)(config, None);
        Ok(success_unset(self.key))
    }

    fn format(&self, config: &Config) -> String {
        match (self.get)(config) {
            Some(id) => format!("  {}: {id}", self.key),
            None => format!("  {}: (unset, default: {})", self.key, self.default_display),
        }
    }
}

pub fn light_theme_handler() -> PaletteHandler {
    PaletteHandler {
        key: "light-theme",
        example: "glint set light-theme solarized-light",
        default_display: "light",
        get: |c| c.light_theme.as_ref(),
        set_field: |c, v| c.light_theme = v,
    }
}

pub fn dark_theme_handler() -> PaletteHandler {
    PaletteHandler {
        key: "dark-theme",
        example: "glint set dark-theme dracula",
        default_display: "dark",
        get: |c| c.dark_theme.as_ref(),
        set_field: |c, v| c.dark_theme = v,
    }
}
