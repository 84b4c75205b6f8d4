//! When steps for the chat command behavioural tests.

use std::sync::Arc;

use github_beard::beard::{BeardSettings, CommandDispatcher, GithubBeard};
use github_beard::chat::test_support::{RecordingChatSender, ScriptedListener};
use github_beard::chat::{ChatId, ChatSender, IncomingMessage};
use github_beard::github::{GithubGateway, OctocrabGithubGateway};
use github_beard::persistence::{DefaultRepoStore, SqliteDefaultRepoStore};
use github_beard::telemetry::TelemetrySink;
use github_beard::telemetry::test_support::RecordingSink;
use rstest_bdd_macros::when;

use crate::beard_commands_bdd_state::{BeardState, SCENARIO_CHAT};
use crate::support::runtime::ensure_runtime_and_server;

fn sender(beard_state: &BeardState) -> Arc<RecordingChatSender> {
    if let Some(existing) = beard_state.sender.get() {
        return existing;
    }
    let created = Arc::new(RecordingChatSender::default());
    beard_state.sender.set(Arc::clone(&created));
    created
}

fn telemetry(beard_state: &BeardState) -> Arc<RecordingSink> {
    if let Some(existing) = beard_state.telemetry.get() {
        return existing;
    }
    let created = Arc::new(RecordingSink::default());
    beard_state.telemetry.set(Arc::clone(&created));
    created
}

#[when("the chat sends {text}")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn chat_sends(beard_state: &BeardState, text: String) {
    let message_text = text.trim_matches('"').to_owned();
    let runtime = ensure_runtime_and_server(&beard_state.runtime, &beard_state.server)
        .unwrap_or_else(|error| panic!("failed to initialise runtime and server: {error}"));
    let api_base = beard_state
        .server
        .with_ref(wiremock::MockServer::uri)
        .expect("mock server not initialised");
    let database_url = beard_state
        .database_url
        .get()
        .expect("database URL not initialised");

    let chat: Arc<dyn ChatSender> = sender(beard_state);
    let telemetry_sink: Arc<dyn TelemetrySink> = telemetry(beard_state);

    runtime.block_on(async move {
        let github: Arc<dyn GithubGateway> = Arc::new(
            OctocrabGithubGateway::for_token(None, &api_base).expect("gateway should build"),
        );
        let store: Arc<dyn DefaultRepoStore> =
            Arc::new(SqliteDefaultRepoStore::new(database_url).expect("store should open"));
        let beard = GithubBeard::new(github, store, Arc::clone(&chat), BeardSettings::default());
        let dispatcher = CommandDispatcher::new(beard, chat, telemetry_sink);

        let mut listener = ScriptedListener::replies(Vec::new());
        let message = IncomingMessage::text(ChatId::new(SCENARIO_CHAT), message_text);
        dispatcher.dispatch(&message, &mut listener).await;
    });
}
