//! Two-phase argument elicitation.
//!
//! A command either carries its argument inline or the resolver asks for it
//! and treats the chat's next message as the answer.

use std::sync::Arc;
use std::time::Duration;

use crate::chat::{ChatId, ChatListener, ChatSender, OutgoingMessage};

use super::{BeardCommand, CommandError};

/// One command invocation in one chat.
pub struct CommandRequest<'a> {
    /// Chat the command came from.
    pub chat_id: ChatId,
    /// Command being run.
    pub command: BeardCommand,
    /// Inline argument, already trimmed.
    pub argument: Option<String>,
    /// Source of follow-up messages in the same chat.
    pub listener: &'a mut dyn ChatListener,
}

impl CommandRequest<'_> {
    /// First whitespace-separated word of the inline argument.
    #[must_use]
    pub fn first_word(&self) -> Option<&str> {
        self.argument
            .as_deref()
            .and_then(|argument| argument.split_whitespace().next())
    }
}

/// Resolves command arguments, prompting when they are missing.
#[derive(Clone)]
pub struct ArgumentResolver {
    chat: Arc<dyn ChatSender>,
    reply_timeout: Duration,
}

impl ArgumentResolver {
    /// Creates a resolver that waits at most `reply_timeout` for replies.
    #[must_use]
    pub fn new(chat: Arc<dyn ChatSender>, reply_timeout: Duration) -> Self {
        Self {
            chat,
            reply_timeout,
        }
    }

    /// Returns the inline argument, or sends `prompt` and returns the trimmed
    /// text of the next message in the chat.
    ///
    /// # Errors
    ///
    /// - [`CommandError::UserInputMissing`] when the chat closes or the reply
    ///   has no text.
    /// - [`CommandError::ReplyTimedOut`] when no reply arrives in time.
    /// - [`CommandError::Chat`] when the prompt cannot be sent.
    pub async fn resolve(
        &self,
        request: &mut CommandRequest<'_>,
        prompt: &str,
    ) -> Result<String, CommandError> {
        if let Some(argument) = request.argument.as_deref() {
            return Ok(argument.to_owned());
        }

        self.chat
            .send_message(request.chat_id, OutgoingMessage::plain(prompt))
            .await?;

        tracing::debug!(
            chat_id = %request.chat_id,
            command = request.command.name(),
            "waiting for argument"
        );

        let reply = tokio::time::timeout(self.reply_timeout, request.listener.wait())
            .await
            .map_err(|_| CommandError::ReplyTimedOut {
                seconds: self.reply_timeout.as_secs(),
            })?;

        reply
            .and_then(|message| message.text)
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or(CommandError::UserInputMissing)
    }
}
