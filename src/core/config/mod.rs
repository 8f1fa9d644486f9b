pub mod data;
pub mod defaults;
pub mod io;

#[cfg(test)]
pub mod tests;

pub use data::{path_display, Config, CustomTheme};
pub use io::ConfigError;
