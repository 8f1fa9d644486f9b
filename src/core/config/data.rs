use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CustomTheme {
    pub id: String,
    pub display_name: String,
    /// Whether this palette belongs to the dark half of the theme pair
    pub dark: Option<bool>,
    pub background: Option<String>,
    /// Style overrides keyed by style name (e.g. `keyword = "#ff79c6, bold"`)
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Active theme brightness: "dark" or "light"
    pub theme: Option<String>,
    /// Theme id used when the display is light (built-in or custom)
    pub light_theme: Option<String>,
    /// Theme id used when the display is dark (built-in or custom)
    pub dark_theme: Option<String>,
    #[serde(default)]
    pub custom_themes: Vec<CustomTheme>,
    /// Enable markdown rendering of assistant replies
    pub markdown: Option<bool>,
    /// Prefix each message with a `[HH:MM:SS]` stamp
    pub timestamps: Option<bool>,
    /// Prefix each message with the sender label ("You: ", "Assistant: ")
    pub sender_labels: Option<bool>,
    /// Maximum number of data rows drawn per table
    pub table_row_limit: Option<usize>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn get_custom_theme(&self, id: &str) -> Option<&CustomTheme> {
        self.custom_themes
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(id))
    }

    pub fn list_custom_themes(&self) -> Vec<&CustomTheme> {
        self.custom_themes.iter().collect()
    }

    pub fn add_custom_theme(&mut self, theme: CustomTheme) {
        self.custom_themes
            .retain(|t| !t.id.eq_ignore_ascii_case(&theme.id));
        self.custom_themes.push(theme);
    }
}
