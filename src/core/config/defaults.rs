use crate::core::config::data::Config;
use crate::ui::markdown::RenderContext;

/// Data rows drawn per table before the rest is left as plain text.
pub const DEFAULT_TABLE_ROW_LIMIT: usize = 50;

impl Config {
    pub fn prefers_dark(&self) -> bool {
        self.theme
            .as_deref()
            .map(|t| t.eq_ignore_ascii_case("dark"))
            .unwrap_or(false)
    }

    pub fn markdown_enabled(&self) -> bool {
        self.markdown.unwrap_or(true)
    }

    pub fn table_row_limit(&self) -> usize {
        self.table_row_limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_TABLE_ROW_LIMIT)
    }

    /// Per-render settings derived from the persisted configuration.
    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            is_dark: self.prefers_dark(),
            markdown_enabled: self.markdown_enabled(),
            sender_labels: self.sender_labels.unwrap_or(true),
            timestamps: self.timestamps.unwrap_or(false),
            table_row_limit: self.table_row_limit(),
        }
    }
}
