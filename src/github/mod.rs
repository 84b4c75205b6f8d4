//! GitHub access for the bot commands.
//!
//! This module wraps Octocrab behind the [`GithubGateway`] trait, parses
//! `owner/name` repository references, and maps Octocrab failures into
//! [`GithubError`] variants so command handlers can tell a missing user or
//! repository apart from transport problems.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::GithubError;
pub use gateway::{GithubGateway, MAX_RESULTS_PER_CALL, OctocrabGithubGateway};
pub use locator::{
    DEFAULT_API_BASE, PersonalAccessToken, RepositoryFullName, RepositoryName, RepositoryOwner,
    UserSelector, parse_api_base,
};
pub use models::{GithubUser, PullRequestSummary, Repository};

#[cfg(test)]
pub use gateway::MockGithubGateway;

#[cfg(test)]
mod tests;
