//! Errors raised by chat transports.

use thiserror::Error;

/// Errors returned while talking to the chat service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    /// The configured API base could not be parsed.
    #[error("invalid chat API URL: {0}")]
    InvalidUrl(String),

    /// No bot token was supplied.
    #[error("chat bot token must not be blank")]
    MissingToken,

    /// The HTTP request failed before a response was decoded.
    #[error("chat transport failed: {message}")]
    Transport {
        /// Error detail from the HTTP client.
        message: String,
    },

    /// The chat service answered with `ok: false`.
    #[error("{method} was rejected: {description}")]
    Api {
        /// Bot API method name.
        method: String,
        /// Description returned by the service.
        description: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode {method} response: {message}")]
    Decode {
        /// Bot API method name.
        method: String,
        /// Error detail from the JSON decoder.
        message: String,
    },
}
