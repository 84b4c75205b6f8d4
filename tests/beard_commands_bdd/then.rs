//! Then steps for the chat command behavioural tests.

use github_beard::telemetry::{CommandOutcome, TelemetryEvent};
use rstest_bdd_macros::then;

use crate::beard_commands_bdd_state::BeardState;

fn replies(beard_state: &BeardState) -> Vec<String> {
    beard_state
        .sender
        .with_ref(|sender| sender.sent_texts())
        .unwrap_or_default()
}

#[then("the bot replies {expected}")]
fn bot_replies(beard_state: &BeardState, expected: String) {
    let expected_text = expected.trim_matches('"');
    let sent = replies(beard_state);
    assert!(
        sent.iter().any(|text| text == expected_text),
        "expected a reply {expected_text:?}, got {sent:?}"
    );
}

#[then("the last reply ends with {suffix}")]
fn last_reply_ends_with(beard_state: &BeardState, suffix: String) {
    let expected_suffix = suffix.trim_matches('"');
    let sent = replies(beard_state);
    let Some(last) = sent.last() else {
        panic!("no replies were sent");
    };
    assert!(
        last.ends_with(expected_suffix),
        "expected last reply to end with {expected_suffix:?}, got {last:?}"
    );
}

#[then("telemetry records {command} as {outcome}")]
fn telemetry_records(beard_state: &BeardState, command: String, outcome: String) {
    let expected_command = command.trim_matches('"');
    let expected_outcome = match outcome.trim_matches('"') {
        "succeeded" => CommandOutcome::Succeeded,
        "failed" => CommandOutcome::Failed,
        "timed out" => CommandOutcome::TimedOut,
        other => panic!("unknown outcome {other:?}"),
    };

    let events = beard_state
        .telemetry
        .with_ref(|sink| sink.take())
        .unwrap_or_default();

    let recorded = events.iter().any(|event| {
        matches!(
            event,
            TelemetryEvent::CommandCompleted { command: name, outcome: result }
                if name == expected_command && *result == expected_outcome
        )
    });
    assert!(
        recorded,
        "expected {expected_command} to complete as {expected_outcome:?}, got {events:?}"
    );
}

#[then("the GitHub API mocks are satisfied")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn verify_mocks(beard_state: &BeardState) {
    let runtime = beard_state.runtime.get().expect("runtime not initialised");
    beard_state
        .server
        .with_ref(|server| runtime.block_on(server.verify()))
        .expect("mock server not initialised");
}

#[then("GitHub received no requests")]
#[expect(
    clippy::expect_used,
    reason = "integration test step; allow-expect-in-tests does not cover integration tests"
)]
fn github_received_nothing(beard_state: &BeardState) {
    let runtime = beard_state.runtime.get().expect("runtime not initialised");
    let requests = beard_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .expect("mock server not initialised")
        .unwrap_or_default();
    let paths: Vec<&str> = requests.iter().map(|request| request.url.path()).collect();
    assert!(paths.is_empty(), "expected no GitHub requests, got {paths:?}");
}
