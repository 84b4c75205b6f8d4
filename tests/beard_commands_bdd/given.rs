//! Given steps for the chat command behavioural tests.

use github_beard::persistence::migrate_database;
use github_beard::telemetry::NoopTelemetrySink;
use rstest_bdd_macros::given;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::beard_commands_bdd_state::BeardState;
use crate::support::runtime::ensure_runtime_and_server;
use crate::support::{create_temp_dir, database_url_in, repository_json};

fn not_found_body() -> serde_json::Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    })
}

fn mount(beard_state: &BeardState, mock: Mock) {
    let runtime = ensure_runtime_and_server(&beard_state.runtime, &beard_state.server)
        .unwrap_or_else(|error| panic!("failed to initialise runtime and server: {error}"));
    beard_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

#[given("a migrated chat database")]
fn migrated_chat_database(beard_state: &BeardState) {
    let temp_dir = create_temp_dir();
    let database_url = database_url_in(&temp_dir);
    migrate_database(&database_url, &NoopTelemetrySink)
        .unwrap_or_else(|error| panic!("migrations should apply: {error}"));
    beard_state.temp_dir.set(temp_dir);
    beard_state.database_url.set(database_url);
}

#[given("GitHub has the repository {full_name}")]
fn github_has_repository(beard_state: &BeardState, full_name: String) {
    let name = full_name.trim_matches('"');
    let mock = Mock::given(method("GET"))
        .and(path(format!("/repos/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository_json(name)))
        .expect(1)
        .named("repository lookup");
    mount(beard_state, mock);
}

#[given("GitHub has no repository {full_name}")]
fn github_lacks_repository(beard_state: &BeardState, full_name: String) {
    let name = full_name.trim_matches('"');
    let mock = Mock::given(method("GET"))
        .and(path(format!("/repos/{name}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .named("missing repository lookup");
    mount(beard_state, mock);
}

#[given("GitHub has no open pull requests for {full_name}")]
fn github_has_no_pulls(beard_state: &BeardState, full_name: String) {
    let name = full_name.trim_matches('"');
    let mock = Mock::given(method("GET"))
        .and(path(format!("/repos/{name}/pulls")))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .named("open pull requests");
    mount(beard_state, mock);
}

#[given("GitHub has no user {login}")]
fn github_has_no_user(beard_state: &BeardState, login: String) {
    let name = login.trim_matches('"');
    let mock = Mock::given(method("GET"))
        .and(path(format!("/users/{name}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .named("missing user");
    mount(beard_state, mock);
}

#[given("a GitHub search for {query} returns {count:usize} repositories")]
fn github_search_returns(beard_state: &BeardState, query: String, count: usize) {
    let terms = query.trim_matches('"');
    let items: Vec<serde_json::Value> = (1..=count)
        .map(|index| repository_json(&format!("octo/{terms}-{index}")))
        .collect();
    let mock = Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", terms))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": count,
            "incomplete_results": false,
            "items": items
        })))
        .expect(1)
        .named("repository search");
    mount(beard_state, mock);
}
