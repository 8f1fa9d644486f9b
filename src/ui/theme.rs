use crate::core::config::Config;
use crate::ui::builtin_themes::{find_builtin_theme, theme_spec_from_custom, ThemeSpec};
use crate::ui::span::StyleName;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: String,
    pub display_name: String,
    pub is_dark: bool,
    // Overall background color to paint behind the transcript
    pub background_color: Color,
    styles: HashMap<StyleName, Style>,
}

impl Theme {
    pub fn dark_default() -> Self {
        // Prefer built-in spec for consistent RGB colors
        if let Some(spec) = find_builtin_theme("dark") {
            return Self::from_spec(&spec);
        }
        Self::fallback(true)
    }

    pub fn light() -> Self {
        if let Some(spec) = find_builtin_theme("light") {
            return Self::from_spec(&spec);
        }
        Self::fallback(false)
    }

    /// Palette-based theme used when the built-in table cannot be read.
    fn fallback(is_dark: bool) -> Self {
        let (fg, code_bg, accent) = if is_dark {
            (Color::White, Color::Rgb(30, 30, 30), Color::Cyan)
        } else {
            (Color::Black, Color::Rgb(248, 248, 248), Color::Blue)
        };
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let styles = HashMap::from([
            (StyleName::User, bold.fg(accent)),
            (StyleName::Assistant, Style::default().fg(fg)),
            (
                StyleName::System,
                Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
            ),
            (StyleName::Error, Style::default().fg(Color::Red)),
            (StyleName::Timestamp, Style::default().fg(Color::DarkGray)),
            (StyleName::CodeBlock, Style::default().bg(code_bg)),
            (StyleName::Keyword, bold.fg(accent)),
            (
                StyleName::Comment,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            (StyleName::Bold, bold),
            (StyleName::Italic, Style::default().add_modifier(Modifier::ITALIC)),
            (
                StyleName::Link,
                Style::default().fg(accent).add_modifier(Modifier::UNDERLINED),
            ),
            (StyleName::TableHeader, bold),
            (
                StyleName::CopyButton,
                Style::default().add_modifier(Modifier::REVERSED),
            ),
        ]);
        Theme {
            id: if is_dark { "dark" } else { "light" }.to_string(),
            display_name: if is_dark { "Dark" } else { "Light" }.to_string(),
            is_dark,
            background_color: if is_dark { Color::Black } else { Color::White },
            styles,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match find_builtin_theme(name) {
            Some(spec) => Self::from_spec(&spec),
            None => Self::dark_default(),
        }
    }

    /// Concrete attributes for a style name. Names the theme leaves out
    /// resolve to the terminal default; `hidden` is always hidden.
    pub fn style(&self, name: StyleName) -> Style {
        let style = self.styles.get(&name).copied().unwrap_or_default();
        if name == StyleName::Hidden {
            style.add_modifier(Modifier::HIDDEN)
        } else {
            style
        }
    }

    pub fn code_block_bg(&self) -> Option<Color> {
        self.styles.get(&StyleName::CodeBlock).and_then(|s| s.bg)
    }

    pub fn from_spec(spec: &ThemeSpec) -> Self {
        let background_color = spec
            .background
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(if spec.dark { Color::Black } else { Color::White });

        let mut styles = HashMap::new();
        for (name, value) in &spec.styles {
            match StyleName::from_name(name) {
                Some(style_name) => {
                    styles.insert(style_name, parse_style(value));
                }
                None => warn!(theme = %spec.id, style = %name, "Ignoring unknown theme style"),
            }
        }

        Theme {
            id: spec.id.clone(),
            display_name: spec.display_name.clone(),
            is_dark: spec.dark,
            background_color,
            styles,
        }
    }
}

/// Parses a single colour token: `#rgb`, `#rrggbb`, `rgb(r,g,b)` or a name.
pub fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if let Some(c) = parse_hex_color(&lower) {
        return Some(c);
    }
    if let Some(c) = parse_rgb_func(&lower) {
        return Some(c);
    }
    match lower.as_str() {
        "black" => Some(Color::Black),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark-grey" | "darkgray" => Some(Color::DarkGray),
        "red" => Some(Color::Red),
        "light_red" | "light-red" => Some(Color::LightRed),
        "green" => Some(Color::Green),
        "light_green" | "light-green" => Some(Color::LightGreen),
        "blue" => Some(Color::Blue),
        "light_blue" | "light-blue" => Some(Color::LightBlue),
        "cyan" => Some(Color::Cyan),
        "light_cyan" | "light-cyan" => Some(Color::LightCyan),
        "magenta" => Some(Color::Magenta),
        "light_magenta" | "light-magenta" => Some(Color::LightMagenta),
        "yellow" => Some(Color::Yellow),
        "light_yellow" | "light-yellow" => Some(Color::LightYellow),
        "reset" => Some(Color::Reset),
        _ => None,
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

fn parse_rgb_func(s: &str) -> Option<Color> {
    // Format: rgb(r,g,b)
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<_> = content
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u16>().ok()?;
    let g = parts[1].parse::<u16>().ok()?;
    let b = parts[2].parse::<u16>().ok()?;
    Some(Color::Rgb(
        r.min(255) as u8,
        g.min(255) as u8,
        b.min(255) as u8,
    ))
}

/// Parses a style string such as `#569cd6, bg:#1e1e1e, bold`.
pub fn parse_style(spec: &str) -> Style {
    let mut style = Style::default();
    for tok in spec.split(',').map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if let Some(bg) = tok.strip_prefix("bg:") {
            if let Some(color) = parse_color(bg) {
                style = style.bg(color);
            }
            continue;
        }
        if let Some(color) = parse_color(tok) {
            style = style.fg(color);
            continue;
        }
        match tok.to_ascii_lowercase().as_str() {
            "bold" => style = style.add_modifier(Modifier::BOLD),
            "italic" => style = style.add_modifier(Modifier::ITALIC),
            "underlined" | "underline" => style = style.add_modifier(Modifier::UNDERLINED),
            "dim" => style = style.add_modifier(Modifier::DIM),
            "reversed" => style = style.add_modifier(Modifier::REVERSED),
            "hidden" => style = style.add_modifier(Modifier::HIDDEN),
            _ => {}
        }
    }
    style
}

/// The light/dark pair the display switches between.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    light: Theme,
    dark: Theme,
    is_dark: bool,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new(Theme::light(), Theme::dark_default(), false)
    }
}

impl StyleRegistry {
    pub fn new(light: Theme, dark: Theme, is_dark: bool) -> Self {
        Self {
            light,
            dark,
            is_dark,
        }
    }

    /// Builds the pair named by the configuration, falling back to the
    /// built-in `light`/`dark` themes for unknown ids.
    pub fn from_config(config: &Config) -> Self {
        let light = resolve_theme(config, config.light_theme.as_deref(), false);
        let dark = resolve_theme(config, config.dark_theme.as_deref(), true);
        Self::new(light, dark, config.prefers_dark())
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Switches the active half of the pair. Returns whether anything changed.
    pub fn set_dark(&mut self, is_dark: bool) -> bool {
        let changed = self.is_dark != is_dark;
        self.is_dark = is_dark;
        changed
    }

    pub fn active(&self) -> &Theme {
        if self.is_dark {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn resolve(&self, name: StyleName) -> Style {
        self.active().style(name)
    }
}

fn resolve_theme(config: &Config, id: Option<&str>, dark: bool) -> Theme {
    let default_id = if dark { "dark" } else { "light" };
    let id = id.unwrap_or(default_id);
    if let Some(custom) = config.get_custom_theme(id) {
        return Theme::from_spec(&theme_spec_from_custom(custom));
    }
    match find_builtin_theme(id) {
        Some(spec) => Theme::from_spec(&spec),
        None => {
            warn!(theme = %id, "Unknown theme, using built-in default");
            if dark {
                Theme::dark_default()
            } else {
                Theme::light()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colors_and_modifiers() {
        let style = parse_style("#569cd6, bg:#1e1e1e, bold");
        assert_eq!(style.fg, Some(Color::Rgb(0x56, 0x9c, 0xd6)));
        assert_eq!(style.bg, Some(Color::Rgb(0x1e, 0x1e, 0x1e)));
        assert!(style.add_modifier.contains(Modifier::BOLD));

        assert_eq!(parse_color("#abc"), Some(Color::Rgb(0xaa, 0xbb, 0xcc)));
        assert_eq!(parse_color("rgb(300, 0, 12)"), Some(Color::Rgb(255, 0, 12)));
        assert_eq!(parse_color("Light-Blue"), Some(Color::LightBlue));
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn original_palette_is_preserved() {
        let light = Theme::light();
        let dark = Theme::dark_default();
        assert_eq!(
            light.style(StyleName::Keyword).fg,
            Some(Color::Rgb(0x00, 0x00, 0xff))
        );
        assert_eq!(
            dark.style(StyleName::Keyword).fg,
            Some(Color::Rgb(0x56, 0x9c, 0xd6))
        );
        assert_eq!(light.code_block_bg(), Some(Color::Rgb(0xf8, 0xf8, 0xf8)));
        assert_eq!(dark.code_block_bg(), Some(Color::Rgb(0x1e, 0x1e, 0x1e)));
        assert!(dark.is_dark);
        assert!(!light.is_dark);
    }

    #[test]
    fn hidden_is_always_hidden() {
        let theme = Theme::light();
        assert!(theme
            .style(StyleName::Hidden)
            .add_modifier
            .contains(Modifier::HIDDEN));
    }

    #[test]
    fn registry_switches_halves() {
        let mut registry = StyleRegistry::default();
        assert!(!registry.is_dark());
        let light_kw = registry.resolve(StyleName::Keyword);
        assert!(registry.set_dark(true));
        assert!(!registry.set_dark(true));
        assert_ne!(registry.resolve(StyleName::Keyword), light_kw);
        assert_eq!(registry.active().id, "dark");
    }

    #[test]
    fn registry_uses_configured_theme_ids() {
        let config = Config {
            theme: Some("dark".into()),
            dark_theme: Some("dracula".into()),
            light_theme: Some("nope".into()),
            ..Default::default()
        };
        let registry = StyleRegistry::from_config(&config);
        assert!(registry.is_dark());
        assert_eq!(registry.active().id, "dracula");
        let mut registry = registry;
        registry.set_dark(false);
        assert_eq!(registry.active().id, "light");
    }
}
