//! Copy affordances for fenced blocks.

use std::time::{Duration, Instant};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::utils::clipboard::Clipboard;

/// How long a copy button shows its acknowledgement.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// One copy action, bound to a fenced block by the block's opening offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyHandle {
    pub id: Uuid,
    pub block_outer_start: usize,
    pub payload: String,
    pub language_tag: Option<String>,
    last_activation: Option<(Instant, CopyOutcome)>,
}

impl CopyHandle {
    pub fn new(block_outer_start: usize, payload: String, language_tag: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            block_outer_start,
            payload,
            language_tag,
            last_activation: None,
        }
    }

    /// Puts the payload on `clipboard` and starts the acknowledgement window.
    pub fn activate(&mut self, clipboard: &dyn Clipboard, now: Instant) -> CopyOutcome {
        let outcome = match clipboard.set_text(&self.payload) {
            Ok(()) => {
                debug!(handle = %self.id, bytes = self.payload.len(), "Copied code block");
                CopyOutcome::Copied
            }
            Err(err) => {
                warn!(handle = %self.id, error = %err, "Copy to clipboard failed");
                CopyOutcome::Failed
            }
        };
        self.last_activation = Some((now, outcome));
        outcome
    }

    /// The outcome still being acknowledged at `now`, if any.
    pub fn acknowledgement(&self, now: Instant) -> Option<CopyOutcome> {
        self.last_activation
            .filter(|(at, _)| now.saturating_duration_since(*at) < COPY_ACK_WINDOW)
            .map(|(_, outcome)| outcome)
    }

    pub fn label(&self, now: Instant) -> &'static str {
        match self.acknowledgement(now) {
            Some(CopyOutcome::Copied) => "Copied!",
            Some(CopyOutcome::Failed) => "Copy failed",
            None => "Copy",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CopyRegistry {
    handles: Vec<CopyHandle>,
}

impl CopyRegistry {
    pub fn register(&mut self, handle: CopyHandle) -> Uuid {
        let id = handle.id;
        self.handles.push(handle);
        id
    }

    pub fn handles(&self) -> &[CopyHandle] {
        &self.handles
    }

    pub fn get(&self, id: Uuid) -> Option<&CopyHandle> {
        self.handles.iter().find(|h| h.id == id)
    }

    /// `None` when no handle has this id.
    pub fn activate(
        &mut self,
        id: Uuid,
        clipboard: &dyn Clipboard,
        now: Instant,
    ) -> Option<CopyOutcome> {
        let handle = self.handles.iter_mut().find(|h| h.id == id)?;
        Some(handle.activate(clipboard, now))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
