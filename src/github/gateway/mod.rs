//! Gateways for talking to GitHub through Octocrab.
//!
//! Command handlers only see the [`GithubGateway`] trait so the concrete
//! client is chosen at composition time and mocked in tests.

mod client;
mod error_mapping;
mod octocrab_gateway;

pub use octocrab_gateway::OctocrabGithubGateway;

use async_trait::async_trait;

use crate::github::error::GithubError;
use crate::github::locator::UserSelector;
use crate::github::models::{GithubUser, PullRequestSummary, Repository};

/// Most results a single listing or search call returns.
pub const MAX_RESULTS_PER_CALL: usize = 100;

/// Read-only GitHub operations needed by the bot commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GithubGateway: Send + Sync {
    /// Fetch a repository by its `owner/name`, exactly as the user typed it.
    ///
    /// A name that cannot exist on GitHub fails as [`GithubError::NotFound`].
    async fn repository(&self, full_name: &str) -> Result<Repository, GithubError>;

    /// Fetch the profile of the selected user.
    async fn user(&self, selector: &UserSelector) -> Result<GithubUser, GithubError>;

    /// Search repositories, returning the first page of hits in GitHub's order.
    async fn search_repositories(&self, query: &str) -> Result<Vec<Repository>, GithubError>;

    /// List every open pull request for the `owner/name` repository, in
    /// upstream order.
    ///
    /// A name that cannot exist on GitHub fails as [`GithubError::NotFound`].
    async fn open_pull_requests(
        &self,
        full_name: &str,
    ) -> Result<Vec<PullRequestSummary>, GithubError>;

    /// List every repository owned by the selected user, in upstream order.
    async fn user_repositories(
        &self,
        selector: &UserSelector,
    ) -> Result<Vec<Repository>, GithubError>;
}
