//! Error mapping helpers for the Octocrab GitHub gateway.

use http::StatusCode;

use crate::github::error::GithubError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Maps an Octocrab error for a lookup of `resource` into a [`GithubError`].
///
/// A 404 becomes [`GithubError::NotFound`] naming the resource so handlers can
/// answer with a specific message.
pub(super) fn map_lookup_error(
    operation: &str,
    resource: &str,
    error: &octocrab::Error,
) -> GithubError {
    if let octocrab::Error::GitHub { source, .. } = error
        && source.status_code == StatusCode::NOT_FOUND
    {
        return GithubError::NotFound {
            resource: resource.to_owned(),
        };
    }
    map_octocrab_error(operation, error)
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> GithubError {
    if let octocrab::Error::GitHub { source, .. } = error {
        if is_rate_limit_error(source) {
            return GithubError::RateLimitExceeded {
                message: format!("{operation} failed: {message}", message = source.message),
            };
        }
        return if is_auth_failure(source.status_code) {
            GithubError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            GithubError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return GithubError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    GithubError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
