use super::data::{path_display, Config, CustomTheme};
use super::defaults::DEFAULT_TABLE_ROW_LIMIT;
use super::io::ConfigError;
use std::collections::BTreeMap;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert!(config.markdown_enabled());
    assert!(!config.prefers_dark());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config {
        theme: Some("dark".to_string()),
        markdown: Some(false),
        table_row_limit: Some(10),
        ..Default::default()
    };
    config.save_to_path(&config_path).expect("save failed");

    let loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded, config);
    assert!(loaded.prefers_dark());
    assert!(!loaded.markdown_enabled());

    config.table_row_limit = None;
    config.save_to_path(&config_path).expect("second save failed");
    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert_eq!(reloaded.table_row_limit(), DEFAULT_TABLE_ROW_LIMIT);
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "markdown = [not toml").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("Failed to parse config"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn custom_themes_round_trip_and_replace_by_id() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    let mut styles = BTreeMap::new();
    styles.insert("keyword".to_string(), "#ff00ff, bold".to_string());
    let mut config = Config::default();
    config.add_custom_theme(CustomTheme {
        id: "neon".into(),
        display_name: "Neon".into(),
        dark: Some(true),
        background: Some("#000000".into()),
        styles: styles.clone(),
    });
    config.add_custom_theme(CustomTheme {
        id: "NEON".into(),
        display_name: "Neon 2".into(),
        dark: Some(true),
        background: None,
        styles,
    });
    assert_eq!(config.list_custom_themes().len(), 1);

    config.save_to_path(&config_path).expect("save failed");
    let loaded = Config::load_from_path(&config_path).expect("load failed");
    let theme = loaded.get_custom_theme("neon").expect("theme persisted");
    assert_eq!(theme.display_name, "Neon 2");
    assert_eq!(
        theme.styles.get("keyword").map(String::as_str),
        Some("#ff00ff, bold")
    );
}

#[test]
fn render_context_reflects_settings() {
    let config = Config {
        theme: Some("Dark".into()),
        markdown: Some(false),
        timestamps: Some(true),
        sender_labels: Some(false),
        table_row_limit: Some(0),
        ..Default::default()
    };
    let ctx = config.render_context();
    assert!(ctx.is_dark);
    assert!(!ctx.markdown_enabled);
    assert!(ctx.timestamps);
    assert!(!ctx.sender_labels);
    assert_eq!(ctx.table_row_limit, DEFAULT_TABLE_ROW_LIMIT);
}

#[cfg(unix)]
#[test]
fn path_display_uses_tilde_under_home() {
    if let Some(home) = std::env::var_os("HOME") {
        let path = std::path::PathBuf::from(home).join(".config/glint");
        assert_eq!(path_display(&path), "~/.config/glint");
    }
}
