use crate::core::config::data::Config;
use crate::ui::builtin_themes::load_builtin_themes;

/// One row of `glint themes` output.
#[derive(Debug, PartialEq, Eq)]
pub struct ThemeListing {
    pub id: String,
    pub display_name: String,
    pub dark: bool,
    pub custom: bool,
    /// Currently selected for its half of the light/dark pair.
    pub selected: bool,
}

pub fn collect_themes(config: &Config) -> Vec<ThemeListing> {
    let light_id = config.light_theme.as_deref().unwrap_or("light");
    let dark_id = config.dark_theme.as_deref().unwrap_or("dark");
    let is_selected = |id: &str, dark: bool| {
        let wanted = if dark { dark_id } else { light_id };
        id.eq_ignore_ascii_case(wanted)
    };

    let mut listings: Vec<ThemeListing> = load_builtin_themes()
        .into_iter()
        .map(|t| ThemeListing {
            selected: is_selected(&t.id, t.dark),
            id: t.id,
            display_name: t.display_name,
            dark: t.dark,
            custom: false,
        })
        .collect();

    for t in config.list_custom_themes() {
        let dark = t.dark.unwrap_or(true);
        listings.push(ThemeListing {
            id: t.id.clone(),
            display_name: t.display_name.clone(),
            dark,
            custom: true,
            selected: is_selected(&t.id, dark),
        });
    }
    listings
}

pub fn list_themes(config: &Config) {
    let listings = collect_themes(config);
    println!("Available themes:\n");

    for (heading, custom) in [("Built-in:", false), ("Custom:", true)] {
        let group: Vec<_> = listings.iter().filter(|t| t.custom == custom).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for t in group {
            let mark = if t.selected { "*" } else { " " };
            let kind = if t.dark { "dark" } else { "light" };
            println!("  {} {} - {} ({kind})", mark, t.id, t.display_name);
        }
        println!();
    }

    let active = if config.prefers_dark() { "dark" } else { "light" };
    println!("Current: {active}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CustomTheme;

    #[test]
    fn marks_one_theme_per_half() {
        let mut config = Config {
            dark_theme: Some("dracula".into()),
            ..Config::default()
        };
        config.add_custom_theme(CustomTheme {
            id: "night".into(),
            display_name: "Night".into(),
            dark: Some(true),
            background: None,
            styles: Default::default(),
        });

        let listings = collect_themes(&config);
        let selected: Vec<&str> = listings
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(selected, vec!["light", "dracula"]);
        assert!(listings.iter().any(|t| t.custom && t.id == "night"));
    }
}
