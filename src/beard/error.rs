//! Errors returned by command handlers.

use thiserror::Error;

use crate::chat::ChatError;
use crate::github::GithubError;
use crate::persistence::PersistenceError;

/// Why a command did not produce its normal reply.
///
/// Handlers return these unhandled; the dispatcher turns each one into a
/// single chat message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The command needed an argument and none arrived.
    #[error("no argument was supplied")]
    UserInputMissing,

    /// The prompt went unanswered for the configured wait.
    #[error("no reply within {seconds} seconds")]
    ReplyTimedOut {
        /// Configured wait.
        seconds: u64,
    },

    /// `/getpr` without an argument in a chat with no default repository.
    #[error("no default repository is set for this chat")]
    NoDefaultRepo,

    /// The default repository write could not be read back.
    #[error("default repository write was not confirmed")]
    StoreConsistency,

    /// GitHub lookup or transport failure.
    #[error(transparent)]
    Github(#[from] GithubError),

    /// Database failure.
    #[error(transparent)]
    Store(#[from] PersistenceError),

    /// Chat transport failure.
    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl CommandError {
    /// Message specific to this error, when there is one.
    ///
    /// Errors without one fall back to the command's generic failure text.
    #[must_use]
    pub fn user_message(&self, command: &str) -> Option<String> {
        match self {
            Self::UserInputMissing => Some(format!("No input received; cancelled /{command}.")),
            Self::ReplyTimedOut { .. } => Some(format!("No reply received; cancelled /{command}.")),
            Self::NoDefaultRepo => {
                Some("No default repo set for this chat. Use /setdefaultrepo first.".to_owned())
            }
            Self::StoreConsistency | Self::Github(_) | Self::Store(_) | Self::Chat(_) => None,
        }
    }

    /// Whether the error is the prompt timing out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::ReplyTimedOut { .. })
    }
}
