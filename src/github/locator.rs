//! Identity wrappers for repositories, users, and GitHub credentials.

use std::fmt;

use url::Url;

use super::error::GithubError;

/// Public GitHub REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A repository reference in `owner/name` form.
///
/// Existence is not checked here; a well-formed name for a missing
/// repository only fails once the gateway resolves it.
///
/// ```
/// use github_beard::github::RepositoryFullName;
///
/// let name = RepositoryFullName::parse(" rust-lang/rust ").expect("valid name");
/// assert_eq!(name.owner().as_str(), "rust-lang");
/// assert_eq!(name.to_string(), "rust-lang/rust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFullName {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositoryFullName {
    /// Parses `owner/name`, trimming surrounding whitespace.
    ///
    /// Segments are limited to the characters GitHub allows in owner and
    /// repository names (`A-Z`, `a-z`, `0-9`, `.`, `_`, `-`), so a parsed name
    /// is always safe to splice into a REST path.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidRepositoryName`] when there is not
    /// exactly one `/`, when a segment is empty, `.` or `..`, or when a
    /// segment contains any other character.
    pub fn parse(input: &str) -> Result<Self, GithubError> {
        let trimmed = input.trim();
        let invalid = || GithubError::InvalidRepositoryName {
            value: trimmed.to_owned(),
        };

        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;
        if !is_valid_segment(owner) || !is_valid_segment(name) {
            return Err(invalid());
        }

        Ok(Self {
            owner: RepositoryOwner(owner.to_owned()),
            name: RepositoryName(name.to_owned()),
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }

    /// REST path for the repository resource.
    #[must_use]
    pub fn repository_path(&self) -> String {
        format!("/repos/{}/{}", self.owner.as_str(), self.name.as_str())
    }

    /// REST path for the repository pull request listing.
    #[must_use]
    pub fn pulls_path(&self) -> String {
        format!("{}/pulls", self.repository_path())
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '.' | '_' | '-'))
}

impl fmt::Display for RepositoryFullName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.owner.as_str(), self.name.as_str())
    }
}

/// Selects whose repositories or profile to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSelector {
    /// The user the configured token belongs to.
    Authenticated,
    /// A user looked up by login.
    Login(String),
}

impl UserSelector {
    /// Uses the given login when present, otherwise the authenticated user.
    #[must_use]
    pub fn from_login(login: Option<&str>) -> Self {
        login
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or(Self::Authenticated, |value| Self::Login(value.to_owned()))
    }

    /// REST path for the selected user's profile.
    #[must_use]
    pub fn profile_path(&self) -> String {
        match self {
            Self::Authenticated => "/user".to_owned(),
            Self::Login(login) => format!("/users/{login}"),
        }
    }

    /// REST path for the selected user's repositories.
    #[must_use]
    pub fn repositories_path(&self) -> String {
        format!("{}/repos", self.profile_path())
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, GithubError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GithubError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Parses and normalises a GitHub API base URL.
///
/// `github.com` web URLs are mapped to `api.github.com`; any other host is
/// used as given so GitHub Enterprise `/api/v3` bases work unchanged.
///
/// # Errors
///
/// Returns [`GithubError::InvalidUrl`] when the value is not an absolute URL
/// with a host.
pub fn parse_api_base(input: &str) -> Result<Url, GithubError> {
    let parsed =
        Url::parse(input.trim()).map_err(|error| GithubError::InvalidUrl(error.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| GithubError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse(DEFAULT_API_BASE)
            .map_err(|error| GithubError::InvalidUrl(error.to_string()));
    }
    Ok(parsed)
}
