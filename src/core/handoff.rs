//! Hand-off of finished messages from worker tasks to the render thread.
//!
//! Workers only ever send; every buffer mutation happens on the side that
//! owns the [`MessageInbox`].

use tokio::sync::mpsc;
use tracing::debug;

use crate::core::message::Message;

/// Sending half, cheap to clone into worker tasks.
#[derive(Clone, Debug)]
pub struct MessageSender {
    tx: mpsc::UnboundedSender<Message>,
}

impl MessageSender {
    /// Returns the message back if the inbox has been dropped.
    pub fn send(&self, message: Message) -> Result<(), Message> {
        self.tx.send(message).map_err(|err| err.0)
    }
}

#[derive(Debug)]
pub struct MessageInbox {
    rx: mpsc::UnboundedReceiver<Message>,
}

impl MessageInbox {
    pub fn new() -> (MessageSender, MessageInbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        (MessageSender { tx }, MessageInbox { rx })
    }

    /// Waits for the next message; `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Hands every message already queued to `render`, without waiting.
    pub fn drain_into<F>(&mut self, mut render: F) -> usize
    where
        F: FnMut(Message),
    {
        let mut count = 0;
        while let Ok(message) = self.rx.try_recv() {
            render(message);
            count += 1;
        }
        if count > 0 {
            debug!(count, "Drained queued messages");
        }
        count
    }
}
