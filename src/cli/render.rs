//! `glint render`: renders transcript files to the terminal.

use std::error::Error;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, warn};

use crate::core::config::data::Config;
use crate::core::handoff::{MessageInbox, MessageSender};
use crate::core::message::{Message, SenderKind};
use crate::ui::ansi::write_lines;
use crate::ui::markdown::{RenderContext, RenderEngine};
use crate::ui::renderer::to_lines;
use crate::ui::theme::StyleRegistry;
use crate::utils::clipboard::SystemClipboard;

pub struct RenderOptions {
    pub files: Vec<PathBuf>,
    pub sender: SenderKind,
    pub theme: Option<String>,
    pub no_markdown: bool,
    pub timestamps: bool,
    /// 1-based index of the code block to put on the clipboard.
    pub copy: Option<usize>,
}

/// Reads every input on a blocking task and hands it over as one message.
/// Standard input is used when no files are named.
fn spawn_reader(files: Vec<PathBuf>, sender: SenderKind, tx: MessageSender) {
    tokio::task::spawn_blocking(move || {
        let inputs: Vec<io::Result<String>> = if files.is_empty() {
            let mut text = String::new();
            vec![io::stdin().read_to_string(&mut text).map(|_| text)]
        } else {
            files.iter().map(std::fs::read_to_string).collect()
        };

        for (idx, input) in inputs.into_iter().enumerate() {
            let message = match input {
                Ok(text) => Message::new(sender, text),
                Err(err) => {
                    let name = files
                        .get(idx)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stdin".to_string());
                    warn!(input = %name, error = %err, "Failed to read input");
                    Message::new(SenderKind::Error, format!("Could not read {name}: {err}"))
                }
            };
            if tx.send(message).is_err() {
                debug!("Render loop stopped before all inputs were read");
                break;
            }
        }
    });
}

pub fn render_context(config: &Config, opts: &RenderOptions) -> Result<RenderContext, Box<dyn Error>> {
    let mut ctx = config.render_context();
    match opts.theme.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => {}
        Some("dark") => ctx.is_dark = true,
        Some("light") => ctx.is_dark = false,
        Some(other) => return Err(format!("Unknown theme brightness: {other} (use dark or light)").into()),
    }
    if opts.no_markdown {
        ctx.markdown_enabled = false;
    }
    if opts.timestamps {
        ctx.timestamps = true;
    }
    Ok(ctx)
}

pub async fn run(opts: RenderOptions) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let ctx = render_context(&config, &opts)?;
    let mut engine = RenderEngine::new(StyleRegistry::from_config(&config));

    let (tx, mut inbox) = MessageInbox::new();
    spawn_reader(opts.files.clone(), opts.sender, tx);

    while let Some(message) = inbox.recv().await {
        engine.render(&message.content, message.sender, &ctx);
        inbox.drain_into(|m| {
            engine.render(&m.content, m.sender, &ctx);
        });
    }

    let mut stdout = io::stdout().lock();
    let color = stdout.is_terminal();
    write_lines(&mut stdout, &to_lines(&engine, Instant::now()), color)?;

    if let Some(n) = opts.copy {
        let handle = n
            .checked_sub(1)
            .and_then(|i| engine.copy_handles().get(i))
            .map(|h| h.id)
            .ok_or_else(|| {
                format!(
                    "No code block #{n} (found {})",
                    engine.copy_handles().len()
                )
            })?;
        match engine.activate_copy(handle, &SystemClipboard, Instant::now()) {
            Some(outcome) => eprintln!("📋 Code block #{n}: {outcome:?}"),
            None => return Err(format!("No code block #{n}").into()),
        }
    }
    Ok(())
}
