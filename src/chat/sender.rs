//! Traits implemented by chat transports.

use async_trait::async_trait;

use super::{ChatAction, ChatError, ChatId, MessageId, OutgoingMessage, Update};

/// Outbound half of a chat transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Sends a new message and returns its identifier.
    async fn send_message(
        &self,
        chat_id: ChatId,
        message: OutgoingMessage,
    ) -> Result<MessageId, ChatError>;

    /// Replaces the text and keyboard of an existing message.
    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<(), ChatError>;

    /// Shows a presence indicator such as "typing".
    async fn send_chat_action(&self, chat_id: ChatId, action: ChatAction)
    -> Result<(), ChatError>;

    /// Acknowledges a button press so the client stops its spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), ChatError>;
}

/// Inbound half of a chat transport.
#[async_trait]
pub trait UpdateSource: Send {
    /// Waits for the next batch of updates. An empty batch is normal.
    async fn poll(&mut self) -> Result<Vec<Update>, ChatError>;
}
