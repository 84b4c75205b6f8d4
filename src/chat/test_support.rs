//! In-memory chat doubles for handler and runtime tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    ChatAction, ChatError, ChatId, ChatListener, ChatSender, IncomingMessage, MessageId,
    OutgoingMessage,
};

/// One outbound call observed by [`RecordingChatSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentItem {
    /// `send_message`, with the identifier handed back to the caller.
    Message {
        /// Target chat.
        chat_id: ChatId,
        /// Assigned identifier.
        message_id: MessageId,
        /// Message content.
        message: OutgoingMessage,
    },
    /// `edit_message`.
    Edit {
        /// Target chat.
        chat_id: ChatId,
        /// Edited message.
        message_id: MessageId,
        /// Replacement content.
        message: OutgoingMessage,
    },
    /// `send_chat_action`.
    Action {
        /// Target chat.
        chat_id: ChatId,
        /// Indicator shown.
        action: ChatAction,
    },
    /// `answer_callback`.
    Answer {
        /// Acknowledged query.
        callback_id: String,
    },
}

#[derive(Debug, Default)]
struct Recorded {
    items: Vec<SentItem>,
    next_message_id: i64,
}

/// [`ChatSender`] that records every call and numbers messages from 1.
#[derive(Debug, Default)]
pub struct RecordingChatSender {
    recorded: Mutex<Recorded>,
}

impl RecordingChatSender {
    /// Every recorded call, oldest first.
    #[must_use]
    pub fn items(&self) -> Vec<SentItem> {
        self.recorded
            .lock()
            .map(|recorded| recorded.items.clone())
            .unwrap_or_default()
    }

    /// Texts of sent messages (edits excluded), oldest first.
    #[must_use]
    pub fn sent_texts(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                SentItem::Message { message, .. } => Some(message.text),
                _ => None,
            })
            .collect()
    }

    /// Sent messages (edits excluded), oldest first.
    #[must_use]
    pub fn sent_messages(&self) -> Vec<OutgoingMessage> {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                SentItem::Message { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Edits, oldest first.
    #[must_use]
    pub fn edits(&self) -> Vec<(MessageId, OutgoingMessage)> {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                SentItem::Edit {
                    message_id,
                    message,
                    ..
                } => Some((message_id, message)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, item: SentItem) {
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.items.push(item);
        }
    }
}

#[async_trait]
impl ChatSender for RecordingChatSender {
    async fn send_message(
        &self,
        chat_id: ChatId,
        message: OutgoingMessage,
    ) -> Result<MessageId, ChatError> {
        let mut recorded = self.recorded.lock().map_err(|error| ChatError::Transport {
            message: error.to_string(),
        })?;
        recorded.next_message_id += 1;
        let message_id = MessageId::new(recorded.next_message_id);
        recorded.items.push(SentItem::Message {
            chat_id,
            message_id,
            message,
        });
        Ok(message_id)
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<(), ChatError> {
        self.push(SentItem::Edit {
            chat_id,
            message_id,
            message,
        });
        Ok(())
    }

    async fn send_chat_action(
        &self,
        chat_id: ChatId,
        action: ChatAction,
    ) -> Result<(), ChatError> {
        self.push(SentItem::Action { chat_id, action });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), ChatError> {
        self.push(SentItem::Answer {
            callback_id: callback_id.to_owned(),
        });
        Ok(())
    }
}

/// [`ChatListener`] that replays queued replies.
///
/// Once the queue is empty it either reports a closed chat or, when built
/// with [`ScriptedListener::silent`], waits forever.
#[derive(Debug)]
pub struct ScriptedListener {
    replies: VecDeque<IncomingMessage>,
    hang_when_empty: bool,
}

impl ScriptedListener {
    /// Replays `replies`, then reports the chat as closed.
    #[must_use]
    pub fn replies(replies: impl IntoIterator<Item = IncomingMessage>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            hang_when_empty: false,
        }
    }

    /// Never yields a message.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            replies: VecDeque::new(),
            hang_when_empty: true,
        }
    }

    /// Replies not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait]
impl ChatListener for ScriptedListener {
    async fn wait(&mut self) -> Option<IncomingMessage> {
        match self.replies.pop_front() {
            Some(reply) => Some(reply),
            None if self.hang_when_empty => std::future::pending().await,
            None => None,
        }
    }
}
