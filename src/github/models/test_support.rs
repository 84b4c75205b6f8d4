//! Builders for repository and pull request fixtures.
//!
//! ```
//! use github_beard::github::models::test_support::{pull_request, repository};
//!
//! let repo = repository("octo/beard");
//! assert_eq!(repo.name, "beard");
//!
//! let pr = pull_request(3, "Fix typo");
//! assert_eq!(pr.author.as_deref(), Some("octocat"));
//! ```

use super::{PullRequestSummary, Repository};

/// Constructs a `Repository` from its full name with stable placeholder data.
#[must_use]
pub fn repository(full_name: &str) -> Repository {
    let name = full_name
        .rsplit_once('/')
        .map_or(full_name, |(_, short)| short);
    Repository {
        full_name: full_name.to_owned(),
        name: name.to_owned(),
        description: Some(format!("Description of {full_name}")),
        html_url: Some(format!("https://github.com/{full_name}")),
        language: Some("Rust".to_owned()),
        stargazers_count: 1,
        forks_count: 0,
        open_issues_count: 0,
    }
}

/// Constructs `count` repositories named `owner/repo-<n>` starting at 1.
#[must_use]
pub fn numbered_repositories(owner: &str, count: usize) -> Vec<Repository> {
    (1..=count)
        .map(|index| repository(&format!("{owner}/repo-{index}")))
        .collect()
}

/// Constructs an open pull request authored by `octocat`.
#[must_use]
pub fn pull_request(number: u64, title: &str) -> PullRequestSummary {
    PullRequestSummary {
        number,
        title: Some(title.to_owned()),
        author: Some("octocat".to_owned()),
        html_url: Some(format!("https://github.com/octo/beard/pull/{number}")),
        head_ref: Some(format!("feature-{number}")),
        base_ref: Some("main".to_owned()),
        draft: false,
        created_at: None,
    }
}
