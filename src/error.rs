//! Top-level error type returned by the binary's startup path.

use thiserror::Error;

use crate::chat::ChatError;
use crate::github::GithubError;
use crate::persistence::PersistenceError;

/// Errors that stop the bot before or while it runs.
#[derive(Debug, Error)]
pub enum BeardError {
    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {message}")]
    Configuration {
        /// Detail from the loader or validator.
        message: String,
    },

    /// No Telegram bot token was configured.
    #[error("a Telegram bot token is required (use --telegram-token or GITHUB_BEARD_TELEGRAM_TOKEN)")]
    MissingTelegramToken,

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {message}")]
    Logging {
        /// Detail from `tracing-subscriber`.
        message: String,
    },

    /// The GitHub client could not be built.
    #[error(transparent)]
    Github(#[from] GithubError),

    /// The database could not be opened or migrated.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The chat transport could not be built or polled.
    #[error(transparent)]
    Chat(#[from] ChatError),
}
