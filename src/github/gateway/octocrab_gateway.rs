//! Octocrab implementation of the GitHub gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::error::GithubError;
use crate::github::locator::{PersonalAccessToken, RepositoryFullName, UserSelector};
use crate::github::models::{
    ApiPullRequest, ApiRepository, ApiRepositorySearch, ApiUser, GithubUser, PullRequestSummary,
    Repository,
};

use super::GithubGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{map_lookup_error, map_octocrab_error};

/// GitHub's maximum page size, matching [`super::MAX_RESULTS_PER_CALL`].
const MAX_PER_PAGE: &str = "100";

/// Octocrab-backed gateway.
pub struct OctocrabGithubGateway {
    client: Octocrab,
}

impl OctocrabGithubGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given API base and optional token.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::InvalidUrl` when the base URI cannot be parsed or
    /// `GithubError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: Option<&PersonalAccessToken>,
        api_base: &str,
    ) -> Result<Self, GithubError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }

    async fn list_all<T>(
        &self,
        operation: &str,
        resource: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, GithubError>
    where
        T: serde::de::DeserializeOwned,
    {
        let first_page = self
            .client
            .get::<Page<T>, _, _>(path, Some(&query))
            .await
            .map_err(|error| map_lookup_error(operation, resource, &error))?;

        self.client
            .all_pages(first_page)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))
    }
}

/// GitHub logins are alphanumeric with single hyphens; anything else cannot
/// exist and must not be spliced into a request path.
fn is_plausible_login(login: &str) -> bool {
    !login.is_empty()
        && login
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '-')
}

fn ensure_plausible_selector(selector: &UserSelector) -> Result<(), GithubError> {
    match selector {
        UserSelector::Login(login) if !is_plausible_login(login) => Err(GithubError::NotFound {
            resource: format!("user {login}"),
        }),
        _ => Ok(()),
    }
}

/// Parses a user-supplied repository name. Anything outside GitHub's name
/// rules cannot exist, so it is reported as missing instead of reaching a
/// request path.
fn resolve_repository(full_name: &str) -> Result<RepositoryFullName, GithubError> {
    RepositoryFullName::parse(full_name).map_err(|_| GithubError::NotFound {
        resource: format!("repository {}", full_name.trim()),
    })
}

fn describe_selector(selector: &UserSelector) -> String {
    match selector {
        UserSelector::Authenticated => "authenticated user".to_owned(),
        UserSelector::Login(login) => format!("user {login}"),
    }
}

#[async_trait]
impl GithubGateway for OctocrabGithubGateway {
    async fn repository(&self, full_name: &str) -> Result<Repository, GithubError> {
        let name = resolve_repository(full_name)?;
        let resource = format!("repository {name}");
        self.client
            .get::<ApiRepository, _, _>(name.repository_path(), None::<&()>)
            .await
            .map(ApiRepository::into)
            .map_err(|error| map_lookup_error("get repository", &resource, &error))
    }

    async fn user(&self, selector: &UserSelector) -> Result<GithubUser, GithubError> {
        ensure_plausible_selector(selector)?;
        let resource = describe_selector(selector);
        let fallback_login = match selector {
            UserSelector::Authenticated => "",
            UserSelector::Login(login) => login.as_str(),
        };

        self.client
            .get::<ApiUser, _, _>(selector.profile_path(), None::<&()>)
            .await
            .map(|user| user.into_user(fallback_login))
            .map_err(|error| map_lookup_error("get user", &resource, &error))
    }

    async fn search_repositories(&self, query: &str) -> Result<Vec<Repository>, GithubError> {
        let params = [("q", query), ("per_page", MAX_PER_PAGE)];
        self.client
            .get::<ApiRepositorySearch, _, _>("/search/repositories", Some(&params))
            .await
            .map(|search| search.items.into_iter().map(ApiRepository::into).collect())
            .map_err(|error| map_octocrab_error("search repositories", &error))
    }

    async fn open_pull_requests(
        &self,
        full_name: &str,
    ) -> Result<Vec<PullRequestSummary>, GithubError> {
        let name = resolve_repository(full_name)?;
        let pulls = self
            .list_all::<ApiPullRequest>(
                "list pull requests",
                &format!("repository {name}"),
                &name.pulls_path(),
                &[("state", "open"), ("per_page", MAX_PER_PAGE)],
            )
            .await?;
        Ok(pulls.into_iter().map(ApiPullRequest::into).collect())
    }

    async fn user_repositories(
        &self,
        selector: &UserSelector,
    ) -> Result<Vec<Repository>, GithubError> {
        ensure_plausible_selector(selector)?;
        let repositories = self
            .list_all::<ApiRepository>(
                "list user repositories",
                &describe_selector(selector),
                &selector.repositories_path(),
                &[("per_page", MAX_PER_PAGE)],
            )
            .await?;
        Ok(repositories.into_iter().map(ApiRepository::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{MAX_PER_PAGE, OctocrabGithubGateway, is_plausible_login};
    use crate::github::error::GithubError;
    use crate::github::gateway::{GithubGateway, MAX_RESULTS_PER_CALL};
    use crate::github::locator::{PersonalAccessToken, UserSelector};

    fn gateway_for(server: &MockServer) -> OctocrabGithubGateway {
        let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
        OctocrabGithubGateway::for_token(Some(&token), &server.uri())
            .expect("should create gateway")
    }

    fn repository_json(full_name: &str) -> serde_json::Value {
        let name = full_name.rsplit('/').next().unwrap_or(full_name);
        json!({
            "full_name": full_name,
            "name": name,
            "description": "A repository",
            "html_url": format!("https://github.com/{full_name}"),
            "language": "Rust",
            "stargazers_count": 12,
            "forks_count": 3,
            "open_issues_count": 1
        })
    }

    #[tokio::test]
    async fn repository_maps_response_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/beard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repository_json("octo/beard")))
            .mount(&server)
            .await;

        let repository = gateway_for(&server)
            .repository("octo/beard")
            .await
            .expect("request should succeed");

        assert_eq!(repository.full_name, "octo/beard");
        assert_eq!(repository.name, "beard");
        assert_eq!(repository.stargazers_count, 12);
        assert_eq!(repository.language.as_deref(), Some("Rust"));
    }

    #[tokio::test]
    async fn repository_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let error = gateway_for(&server)
            .repository("octo/missing")
            .await
            .expect_err("request should fail");

        assert_eq!(
            error,
            GithubError::NotFound {
                resource: "repository octo/missing".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn user_maps_401_to_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&server)
            .await;

        let error = gateway_for(&server)
            .user(&UserSelector::Authenticated)
            .await
            .expect_err("request should fail");

        assert!(
            matches!(error, GithubError::Authentication { .. }),
            "expected Authentication, got {error:?}"
        );
    }

    #[tokio::test]
    async fn user_by_login_reads_display_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "name": "The Octocat"
            })))
            .mount(&server)
            .await;

        let user = gateway_for(&server)
            .user(&UserSelector::Login("octocat".to_owned()))
            .await
            .expect("request should succeed");

        assert_eq!(user.login, "octocat");
        assert_eq!(user.display_name(), "The Octocat");
    }

    #[tokio::test]
    async fn search_repositories_sends_query_and_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "telegram bot"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [repository_json("a/first"), repository_json("b/second")]
            })))
            .mount(&server)
            .await;

        let results = gateway_for(&server)
            .search_repositories("telegram bot")
            .await
            .expect("search should succeed");

        let names: Vec<&str> = results
            .iter()
            .map(|repository| repository.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["a/first", "b/second"]);
    }

    #[tokio::test]
    async fn open_pull_requests_follows_pagination_links() {
        let server = MockServer::start().await;
        let pulls_path = "/repos/octo/beard/pulls";
        let next_url = format!("{}{pulls_path}?state=open&per_page=100&page=2", server.uri());

        Mock::given(method("GET"))
            .and(path(pulls_path))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "number": 3, "title": "Third" }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(pulls_path))
            .and(query_param("state", "open"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([
                        { "number": 1, "title": "First" },
                        { "number": 2, "title": "Second" }
                    ]))
                    .insert_header("Link", format!("<{next_url}>; rel=\"next\"")),
            )
            .mount(&server)
            .await;

        let pulls = gateway_for(&server)
            .open_pull_requests("octo/beard")
            .await
            .expect("listing should succeed");

        let numbers: Vec<u64> = pulls.iter().map(|pull| pull.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn user_repositories_uses_authenticated_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([repository_json("me/dotfiles")])),
            )
            .mount(&server)
            .await;

        let repositories = gateway_for(&server)
            .user_repositories(&UserSelector::Authenticated)
            .await
            .expect("listing should succeed");

        assert_eq!(repositories.len(), 1);
        assert_eq!(
            repositories.first().map(|repository| repository.name.as_str()),
            Some("dotfiles")
        );
    }

    #[tokio::test]
    async fn implausible_login_is_not_found_without_a_request() {
        let server = MockServer::start().await;

        let error = gateway_for(&server)
            .user(&UserSelector::Login("../admin".to_owned()))
            .await
            .expect_err("lookup should fail");

        assert!(error.is_not_found(), "expected NotFound, got {error:?}");
        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty(), "no request should reach GitHub");
    }

    #[rstest]
    #[case::parent_directory("../user")]
    #[case::nested_traversal("octo/../../user")]
    #[case::query("octo/beard?per_page=1")]
    #[case::single_segment("myrepo")]
    #[tokio::test]
    async fn unusable_repository_name_is_not_found_without_a_request(#[case] full_name: &str) {
        let server = MockServer::start().await;
        let gateway = gateway_for(&server);

        let repository_error = gateway
            .repository(full_name)
            .await
            .expect_err("lookup should fail");
        let pulls_error = gateway
            .open_pull_requests(full_name)
            .await
            .expect_err("listing should fail");

        assert!(
            repository_error.is_not_found(),
            "expected NotFound, got {repository_error:?}"
        );
        assert!(pulls_error.is_not_found(), "expected NotFound, got {pulls_error:?}");
        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty(), "no request should reach GitHub");
    }

    #[rstest]
    #[case::plain("octocat", true)]
    #[case::hyphenated("mona-lisa", true)]
    #[case::path_traversal("../x", false)]
    #[case::query_injection("a?b=c", false)]
    #[case::empty("", false)]
    fn login_plausibility(#[case] login: &str, #[case] expected: bool) {
        assert_eq!(is_plausible_login(login), expected);
    }

    #[rstest]
    fn page_size_query_matches_the_advertised_cap() {
        assert_eq!(MAX_PER_PAGE, MAX_RESULTS_PER_CALL.to_string());
    }
}
