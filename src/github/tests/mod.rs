//! Unit tests for repository references, user selection, and API bases.

use rstest::rstest;

use super::{
    GithubError, PersonalAccessToken, RepositoryFullName, UserSelector, parse_api_base,
};

#[rstest]
fn parses_owner_and_name() {
    let name = RepositoryFullName::parse("octo/repo").expect("should parse owner/name");
    assert_eq!(name.owner().as_str(), "octo", "owner mismatch");
    assert_eq!(name.name().as_str(), "repo", "name mismatch");
    assert_eq!(name.to_string(), "octo/repo", "display mismatch");
}

#[rstest]
fn trims_surrounding_whitespace() {
    let name = RepositoryFullName::parse("  octo/repo\n").expect("should parse trimmed input");
    assert_eq!(name.to_string(), "octo/repo");
}

#[rstest]
#[case::dotted("rust-lang/rust.vim")]
#[case::underscored("octo_org/my_repo")]
#[case::dot_prefixed("octo/.github")]
fn accepts_github_name_characters(#[case] input: &str) {
    let result = RepositoryFullName::parse(input);
    assert!(result.is_ok(), "expected {input:?} to parse, got {result:?}");
}

#[rstest]
fn builds_rest_paths() {
    let name = RepositoryFullName::parse("octo/repo").expect("should parse owner/name");
    assert_eq!(name.repository_path(), "/repos/octo/repo");
    assert_eq!(name.pulls_path(), "/repos/octo/repo/pulls");
}

#[rstest]
#[case::missing_slash("octorepo")]
#[case::empty_owner("/repo")]
#[case::empty_name("octo/")]
#[case::extra_segment("octo/repo/pulls")]
#[case::inner_whitespace("octo/my repo")]
#[case::blank("   ")]
#[case::parent_owner("../user")]
#[case::current_dir_name("octo/.")]
#[case::parent_name("octo/..")]
#[case::query("octo/repo?per_page=1")]
#[case::fragment("octo/repo#readme")]
#[case::percent_escape("octo/%2e%2e")]
fn rejects_malformed_names(#[case] input: &str) {
    let result = RepositoryFullName::parse(input);
    assert!(
        matches!(result, Err(GithubError::InvalidRepositoryName { .. })),
        "expected InvalidRepositoryName for {input:?}, got {result:?}"
    );
}

#[rstest]
#[case::absent(None, UserSelector::Authenticated)]
#[case::blank(Some("  "), UserSelector::Authenticated)]
#[case::login(Some("octocat"), UserSelector::Login("octocat".to_owned()))]
fn user_selector_from_optional_login(#[case] login: Option<&str>, #[case] expected: UserSelector) {
    assert_eq!(UserSelector::from_login(login), expected);
}

#[rstest]
#[case::authenticated(UserSelector::Authenticated, "/user", "/user/repos")]
#[case::login(UserSelector::Login("octocat".to_owned()), "/users/octocat", "/users/octocat/repos")]
fn user_selector_paths(
    #[case] selector: UserSelector,
    #[case] profile: &str,
    #[case] repositories: &str,
) {
    assert_eq!(selector.profile_path(), profile);
    assert_eq!(selector.repositories_path(), repositories);
}

#[rstest]
fn github_web_host_maps_to_public_api() {
    let base = parse_api_base("https://github.com").expect("should parse");
    assert_eq!(base.as_str(), "https://api.github.com/");
}

#[rstest]
fn enterprise_base_is_kept() {
    let base = parse_api_base("https://ghe.example.com/api/v3").expect("should parse");
    assert_eq!(base.as_str(), "https://ghe.example.com/api/v3");
}

#[rstest]
fn rejects_relative_api_base() {
    let result = parse_api_base("api.github.com");
    assert!(
        matches!(result, Err(GithubError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
fn rejects_empty_token() {
    let result = PersonalAccessToken::new(String::new());
    assert!(
        matches!(result, Err(GithubError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}
