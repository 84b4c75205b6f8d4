//! Routes chat messages to command handlers and reports failures.

use std::sync::Arc;

use crate::chat::{CallbackQuery, ChatId, ChatListener, ChatSender, IncomingMessage, OutgoingMessage};
use crate::telemetry::{CommandOutcome, TelemetryEvent, TelemetrySink};

use super::args::CommandRequest;
use super::command::{BeardCommand, CommandLine};
use super::handlers::GithubBeard;
use super::CommandError;

/// Reply used when neither the error nor the command has a specific message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Sorry, something went wrong.";

/// The dispatch boundary between the chat runtime and the handlers.
pub struct CommandDispatcher {
    beard: GithubBeard,
    chat: Arc<dyn ChatSender>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl CommandDispatcher {
    /// Creates a dispatcher over `beard`.
    #[must_use]
    pub fn new(
        beard: GithubBeard,
        chat: Arc<dyn ChatSender>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            beard,
            chat,
            telemetry,
        }
    }

    /// Handles one inbound message.
    ///
    /// Non-commands and unknown commands are ignored. A failing command
    /// produces exactly one chat message; if that send fails too it is only
    /// logged.
    pub async fn dispatch(&self, message: &IncomingMessage, listener: &mut dyn ChatListener) {
        let Some(line) = message.text.as_deref().and_then(CommandLine::parse) else {
            tracing::debug!(chat_id = %message.chat_id, "ignoring non-command message");
            return;
        };
        let Some(command) = BeardCommand::from_name(&line.name) else {
            tracing::debug!(chat_id = %message.chat_id, command = %line.name, "ignoring unknown command");
            return;
        };

        tracing::info!(chat_id = %message.chat_id, command = command.name(), "running command");
        let mut request = CommandRequest {
            chat_id: message.chat_id,
            command,
            argument: line.argument,
            listener,
        };
        let result = self.beard.run(&mut request).await;

        let outcome = match result {
            Ok(()) => CommandOutcome::Succeeded,
            Err(error) => {
                self.report_failure(message.chat_id, command, &error).await;
                if error.is_timeout() {
                    CommandOutcome::TimedOut
                } else {
                    CommandOutcome::Failed
                }
            }
        };

        self.telemetry.record(TelemetryEvent::CommandCompleted {
            command: command.name().to_owned(),
            outcome,
        });
    }

    /// Forwards a navigation button press to the paginator.
    pub async fn handle_callback(&self, query: &CallbackQuery) {
        if let Err(error) = self.beard.paginator().handle_callback(query).await {
            tracing::warn!(chat_id = %query.chat_id, %error, "failed to handle pagination callback");
        }
    }

    async fn report_failure(&self, chat_id: ChatId, command: BeardCommand, error: &CommandError) {
        tracing::warn!(chat_id = %chat_id, command = command.name(), %error, "command failed");

        let text = failure_message(command, error);
        if let Err(send_error) = self
            .chat
            .send_message(chat_id, OutgoingMessage::plain(text))
            .await
        {
            tracing::warn!(
                chat_id = %chat_id,
                command = command.name(),
                error = %send_error,
                "failed to report command failure"
            );
        }
    }
}

/// Picks the single message shown for a failed command.
#[must_use]
pub fn failure_message(command: BeardCommand, error: &CommandError) -> String {
    error
        .user_message(command.name())
        .or_else(|| command.fallback_message().map(str::to_owned))
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned())
}
