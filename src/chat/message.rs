//! Chat-side value types shared by handlers and transports.

use std::fmt;

/// Identifier of a chat (private chat, group, or channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChatId(i64);

impl ChatId {
    /// Wraps a raw chat identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier of a message within a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(i64);

impl MessageId {
    /// Wraps a raw message identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// A message received from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Chat the message was posted in.
    pub chat_id: ChatId,
    /// Message text; `None` for stickers, photos, and other non-text content.
    pub text: Option<String>,
}

impl IncomingMessage {
    /// Builds a text message for `chat_id`.
    #[must_use]
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: Some(text.into()),
        }
    }
}

/// A press of an inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery {
    /// Opaque identifier used to answer the query.
    pub id: String,
    /// Chat holding the message the button belongs to.
    pub chat_id: ChatId,
    /// Message the button belongs to.
    pub message_id: MessageId,
    /// Callback data attached to the button.
    pub data: Option<String>,
}

/// Inbound traffic delivered by an [`UpdateSource`](super::UpdateSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// A chat message.
    Message(IncomingMessage),
    /// A button press.
    CallbackQuery(CallbackQuery),
}

/// How the chat service should render message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Text is shown verbatim.
    #[default]
    Plain,
    /// Text carries HTML markup.
    Html,
}

/// Presence indicators shown while the bot works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    /// "typing…"
    Typing,
}

impl ChatAction {
    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typing => "typing",
        }
    }
}

/// An inline keyboard button carrying callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    /// Button label.
    pub text: String,
    /// Data delivered back in the [`CallbackQuery`].
    pub callback_data: String,
}

impl InlineButton {
    /// Creates a button.
    #[must_use]
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// A message the bot sends or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Message body.
    pub text: String,
    /// Rendering mode for `text`.
    pub parse_mode: ParseMode,
    /// A single row of inline buttons; empty for no keyboard.
    pub buttons: Vec<InlineButton>,
}

impl OutgoingMessage {
    /// Plain-text message without buttons.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
            buttons: Vec::new(),
        }
    }

    /// HTML message without buttons.
    #[must_use]
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Html,
            buttons: Vec::new(),
        }
    }

    /// Attaches a row of inline buttons.
    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<InlineButton>) -> Self {
        self.buttons = buttons;
        self
    }
}
