use std::io::Write;
use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

/// Destination for copied code blocks.
pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<(), String>;
}

/// The desktop clipboard, reached through the platform's copy command.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), String> {
        copy_to_clipboard(text)
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    #[cfg(target_os = "macos")]
    {
        return run_with_stdin("pbcopy", &[], text);
    }
    #[cfg(target_os = "windows")]
    {
        return run_with_stdin("cmd", &["/C", "clip"], text);
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        const CANDIDATES: [(&str, &[&str]); 3] = [
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ];
        for (cmd, args) in CANDIDATES {
            match run_with_stdin(cmd, args, text) {
                Ok(()) => return Ok(()),
                Err(err) => debug!(command = cmd, error = %err, "Clipboard command unavailable"),
            }
        }
        warn!("No clipboard command found");
        Err("No clipboard command found (install wl-copy, xclip, or xsel)".to_string())
    }
}

fn run_with_stdin(cmd: &str, args: &[&str], input: &str) -> Result<(), String> {
    let child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| format!("Clipboard command `{cmd}` not available"))?;
    feed_and_wait(child, cmd, input)
}

/// Writes `input` to the child's stdin and always reaps the child, even
/// when the write fails.
fn feed_and_wait(mut child: Child, cmd: &str, input: &str) -> Result<(), String> {
    // stdin is dropped before waiting so the command sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait();
    if let Err(e) = written {
        return Err(format!("Clipboard command `{cmd}` rejected input: {e}"));
    }
    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(format!("Clipboard command `{cmd}` failed")),
    }
}
