//! Error types exposed by the GitHub gateway layer.

use thiserror::Error;

/// Errors surfaced while parsing repository names or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GithubError {
    /// The repository name is not of the form `owner/name`.
    #[error("repository must be given as owner/name, got `{value}`")]
    InvalidRepositoryName {
        /// The rejected input.
        value: String,
    },

    /// The configured API base URL could not be parsed.
    #[error("GitHub API URL is invalid: {0}")]
    InvalidUrl(String),

    /// A personal access token was supplied but blank.
    #[error("personal access token must not be blank")]
    MissingToken,

    /// The requested user or repository does not exist.
    #[error("{resource} was not found on GitHub")]
    NotFound {
        /// Human-readable description of the missing entity.
        resource: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}

impl GithubError {
    /// Returns true when GitHub reported that the entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
