//! Scenario state for the chat command behavioural tests.

use std::sync::Arc;

use github_beard::chat::test_support::RecordingChatSender;
use github_beard::telemetry::test_support::RecordingSink;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;
use wiremock::MockServer;

pub(crate) use crate::support::runtime::SharedRuntime;

/// Chat every scenario talks from.
pub(crate) const SCENARIO_CHAT: i64 = 1001;

#[derive(ScenarioState, Default)]
pub(crate) struct BeardState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) temp_dir: Slot<TempDir>,
    pub(crate) database_url: Slot<String>,
    pub(crate) sender: Slot<Arc<RecordingChatSender>>,
    pub(crate) telemetry: Slot<Arc<RecordingSink>>,
}
