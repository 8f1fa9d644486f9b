//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod render;
pub mod settings;
pub mod theme_list;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::render::RenderOptions;
use crate::cli::settings::SettingRegistry;
use crate::cli::theme_list::list_themes;
use crate::core::config::data::{path_display, Config};
use crate::core::message::SenderKind;

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Render AI chat replies with code highlighting, tables and markdown")]
#[command(
    long_about = "Glint renders chat transcripts the way a chat client shows them: fenced code \
blocks get a background, Python is syntax highlighted, pipe tables become box-drawn grids and \
inline markdown (bold, italic, code, links, headings) is styled with its delimiters hidden.\n\n\
Environment Variables:\n\
  GLINT_LOG         Log filter, e.g. 'debug' or 'glint=trace' (default: warn)\n\n\
Examples:\n\
  glint render reply.md              Render a saved assistant reply\n\
  cat reply.md | glint render        Render from standard input\n\
  glint render reply.md --copy 1     Also copy the first code block\n\
  glint set theme dark               Use the dark half of the theme pair"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write diagnostics to the given file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render messages from files (or standard input) to the terminal
    Render {
        /// Files to render, one message each
        files: Vec<PathBuf>,
        /// Who wrote the messages: user, assistant, system or error
        #[arg(short = 's', long, default_value = "assistant")]
        sender: SenderKind,
        /// Override the configured brightness: dark or light
        #[arg(short = 't', long)]
        theme: Option<String>,
        /// Show the text verbatim without markdown styling
        #[arg(long)]
        no_markdown: bool,
        /// Prefix each message with the time it was rendered
        #[arg(long)]
        timestamps: bool,
        /// Copy the Nth code block (1-based) to the clipboard
        #[arg(short = 'c', long, value_name = "N")]
        copy: Option<usize>,
    },
    /// List available themes
    Themes,
    /// Set configuration values (lists current values without arguments)
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    crate::logging::init(args.log.as_deref())?;

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let Some(command) = args.command else {
        let path = Config::get_config_path()?;
        println!("No command given. Try 'glint render <FILE>' or 'glint --help'.");
        println!("Configuration: {}", path_display(path));
        return Ok(());
    };

    match command {
        Commands::Render {
            files,
            sender,
            theme,
            no_markdown,
            timestamps,
            copy,
        } => {
            render::run(RenderOptions {
                files,
                sender,
                theme,
                no_markdown,
                timestamps,
                copy,
            })
            .await
        }
        Commands::Themes => {
            let config = Config::load()?;
            list_themes(&config);
            Ok(())
        }
        Commands::Set { key, value } => {
            let registry = SettingRegistry::new();
            let mut config = Config::load()?;
            let Some(key) = key else {
                println!("Current configuration:");
                for line in registry.describe(&config) {
                    println!("{line}");
                }
                return Ok(());
            };
            match registry.set(&key, &value, &mut config) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
        Commands::Unset { key } => {
            let registry = SettingRegistry::new();
            let mut config = Config::load()?;
            match registry.unset(&key, &mut config) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let args = Args::try_parse_from([
            "glint", "render", "a.md", "b.md", "--sender", "model", "--no-markdown", "-c", "2",
            "-l", "glint.log",
        ])
        .expect("valid args");
        assert_eq!(args.log.as_deref(), Some(std::path::Path::new("glint.log")));
        match args.command {
            Some(Commands::Render {
                files,
                sender,
                no_markdown,
                copy,
                ..
            }) => {
                assert_eq!(files.len(), 2);
                assert_eq!(sender, SenderKind::Assistant);
                assert!(no_markdown);
                assert_eq!(copy, Some(2));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn set_collects_multi_word_values() {
        let args = Args::try_parse_from(["glint", "set", "dark-theme", "solarized", "light"])
            .expect("valid args");
        match args.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key.as_deref(), Some("dark-theme"));
                assert_eq!(value, vec!["solarized", "light"]);
            }
            _ => panic!("expected set command"),
        }
    }
}
