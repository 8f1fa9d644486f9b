use crate::core::config::CustomTheme;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeSpec {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub dark: bool,
    pub background: Option<String>,
    /// Style name (e.g. `keyword`) to style string (e.g. `#569cd6, bold`).
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct BuiltinThemesConfig {
    themes: Vec<ThemeSpec>,
}

pub fn load_builtin_themes() -> Vec<ThemeSpec> {
    const CONFIG_CONTENT: &str = include_str!("builtin_themes.toml");
    let config: BuiltinThemesConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_themes.toml");
    config.themes
}

pub fn find_builtin_theme(id: &str) -> Option<ThemeSpec> {
    load_builtin_themes()
        .into_iter()
        .find(|t| t.id.eq_ignore_ascii_case(id))
}

/// Convert a `CustomTheme` from config into a `ThemeSpec`.
///
/// Custom themes inherit every style they leave out from the built-in theme
/// of the same brightness, so a custom palette only has to list overrides.
pub fn theme_spec_from_custom(ct: &CustomTheme) -> ThemeSpec {
    let dark = ct.dark.unwrap_or(true);
    let base_id = if dark { "dark" } else { "light" };
    let mut styles = find_builtin_theme(base_id)
        .map(|spec| spec.styles)
        .unwrap_or_default();
    for (name, value) in &ct.styles {
        styles.insert(name.clone(), value.clone());
    }
    ThemeSpec {
        id: ct.id.clone(),
        display_name: ct.display_name.clone(),
        dark,
        background: ct.background.clone(),
        styles,
    }
}
