//! Octocrab client construction helpers for gateway implementations.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::GithubError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given API base URL.
///
/// Without a token the client talks to GitHub anonymously, which is enough
/// for public repositories but cannot resolve the authenticated user.
///
/// # Errors
///
/// Returns `GithubError::InvalidUrl` when the base URI cannot be parsed or
/// `GithubError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: Option<&PersonalAccessToken>,
    api_base: &str,
) -> Result<Octocrab, GithubError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| GithubError::InvalidUrl(error.to_string()))?;

    let builder = match token {
        Some(value) => Octocrab::builder().personal_token(value.as_ref()),
        None => Octocrab::builder(),
    };

    builder
        .base_uri(base_uri)
        .map_err(|error| GithubError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
