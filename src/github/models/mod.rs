//! Data models for repositories, pull requests, and users.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into the public domain types handed to the message formatters.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Repository details used for lookups, search results, and listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repository {
    /// `owner/name` identifier.
    pub full_name: String,
    /// Short repository name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
    /// Primary language reported by GitHub.
    pub language: Option<String>,
    /// Number of stars.
    pub stargazers_count: u64,
    /// Number of forks.
    pub forks_count: u64,
    /// Number of open issues (including pull requests).
    pub open_issues_count: u64,
}

/// Read-only view of an open pull request used only for formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: Option<String>,
    /// Author login if present.
    pub author: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
    /// Source branch.
    pub head_ref: Option<String>,
    /// Target branch.
    pub base_ref: Option<String>,
    /// Whether the pull request is still a draft.
    pub draft: bool,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
}

/// A GitHub account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubUser {
    /// Account login.
    pub login: String,
    /// Display name if the user set one.
    pub name: Option<String>,
}

impl GithubUser {
    /// Display name, falling back to the login.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.login.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) full_name: String,
    pub(super) name: String,
    pub(super) description: Option<String>,
    pub(super) html_url: Option<String>,
    pub(super) language: Option<String>,
    #[serde(default)]
    pub(super) stargazers_count: u64,
    #[serde(default)]
    pub(super) forks_count: u64,
    #[serde(default)]
    pub(super) open_issues_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
    pub(super) name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiBranchRef {
    #[serde(rename = "ref")]
    pub(super) name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) html_url: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) head: Option<ApiBranchRef>,
    pub(super) base: Option<ApiBranchRef>,
    #[serde(default)]
    pub(super) draft: Option<bool>,
    pub(super) created_at: Option<DateTime<Utc>>,
}

/// Envelope returned by `GET /search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepositorySearch {
    #[serde(default)]
    pub(super) items: Vec<ApiRepository>,
}

impl From<ApiRepository> for Repository {
    fn from(value: ApiRepository) -> Self {
        Self {
            full_name: value.full_name,
            name: value.name,
            description: value.description,
            html_url: value.html_url,
            language: value.language,
            stargazers_count: value.stargazers_count,
            forks_count: value.forks_count,
            open_issues_count: value.open_issues_count,
        }
    }
}

impl From<ApiPullRequest> for PullRequestSummary {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title,
            author: value.user.and_then(|user| user.login),
            html_url: value.html_url,
            head_ref: value.head.and_then(|branch| branch.name),
            base_ref: value.base.and_then(|branch| branch.name),
            draft: value.draft.unwrap_or(false),
            created_at: value.created_at,
        }
    }
}

impl ApiUser {
    /// Converts into a [`GithubUser`], using `fallback_login` when GitHub
    /// omitted the login.
    pub(super) fn into_user(self, fallback_login: &str) -> GithubUser {
        GithubUser {
            login: self.login.unwrap_or_else(|| fallback_login.to_owned()),
            name: self.name,
        }
    }
}
