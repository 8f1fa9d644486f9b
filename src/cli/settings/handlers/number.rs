use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{success_set, success_unset};
use crate::cli::settings::SettingHandler;
use crate::core::config::data::Config;
use crate::core::config::defaults::DEFAULT_TABLE_ROW_LIMIT;

/// Handler for `table-row-limit`.
pub struct TableRowLimitHandler;

impl SettingHandler for TableRowLimitHandler {
    fn key(&self) -> &'static str {
        "table-row-limit"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To cap the rows drawn per table, specify a number:",
                example: "glint set table-row-limit 20",
            });
        };

        let limit = input
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| SettingError::InvalidValue {
                key: "table-row-limit",
                input: input.clone(),
                expected: "a positive whole number",
            })?;
        config.table_row_limit = Some(limit);
        Ok(success_set("table-row-limit", &limit.to_string()))
    }

    fn unset(&self, config: &mut Config) -> Result<String, SettingError> {
        config.table_row_limit = None;
        Ok(success_unset("table-row-limit"))
    }

    fn format(&self, config: &Config) -> String {
        match config.table_row_limit {
            Some(limit) => format!("  table-row-limit: {limit}"),
            None => format!("  table-row-limit: (unset, default: {DEFAULT_TABLE_ROW_LIMIT})"),
        }
    }
}
