//! Chat transport abstraction.
//!
//! Command handlers talk to the chat through [`ChatSender`] and read replies
//! through [`ChatListener`]. The runtime pulls inbound traffic from an
//! [`UpdateSource`]. The Telegram Bot API implementation lives in
//! [`telegram`].

mod error;
mod listener;
mod message;
mod sender;
pub mod telegram;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::ChatError;
pub use listener::{ChannelListener, ChatListener};
pub use message::{
    CallbackQuery, ChatAction, ChatId, IncomingMessage, InlineButton, MessageId, OutgoingMessage,
    ParseMode, Update,
};
pub use sender::{ChatSender, UpdateSource};

#[cfg(test)]
pub use sender::MockChatSender;
