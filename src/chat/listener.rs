//! Per-chat message listener used to wait for replies.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::IncomingMessage;

/// Yields the messages posted in one chat, in order.
#[async_trait]
pub trait ChatListener: Send {
    /// Waits for the next message. `None` once the chat session has closed.
    async fn wait(&mut self) -> Option<IncomingMessage>;
}

/// [`ChatListener`] fed by the runtime through a bounded mailbox.
#[derive(Debug)]
pub struct ChannelListener {
    receiver: mpsc::Receiver<IncomingMessage>,
}

impl ChannelListener {
    /// Wraps the receiving end of a chat mailbox.
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<IncomingMessage>) -> Self {
        Self { receiver }
    }

    /// Stops accepting new messages. Already queued messages are still
    /// returned by [`ChatListener::wait`], then it yields `None`.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

#[async_trait]
impl ChatListener for ChannelListener {
    async fn wait(&mut self) -> Option<IncomingMessage> {
        self.receiver.recv().await
    }
}
