//! Application telemetry events and sinks.
//!
//! Telemetry here is operational only: it records the active database schema
//! version and the outcome of each chat command so that logs can answer
//! "which commands fail and how often" without a metrics backend.

use serde::{Deserialize, Serialize};

/// How a chat command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The command produced its normal reply.
    Succeeded,
    /// The command failed and the chat received a fallback reply.
    Failed,
    /// The argument prompt expired before the user replied.
    TimedOut,
}

/// A structured telemetry event emitted by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20260301000000`).
        schema_version: String,
    },
    /// Records the end of one command invocation.
    CommandCompleted {
        /// Command name without the leading slash.
        command: String,
        /// Final outcome.
        outcome: CommandOutcome,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Forwards telemetry events to the `tracing` subscriber as JSON payloads
/// under the `telemetry` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        tracing::info!(target: "telemetry", event = %serialised, "telemetry event");
    }
}

/// In-memory sinks for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Captures every recorded event for later inspection.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        /// Drains and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::{CommandOutcome, TelemetryEvent, TelemetrySink};

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingSink::default();
        sink.record(TelemetryEvent::SchemaVersionRecorded {
            schema_version: "20260301000000".to_owned(),
        });

        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::SchemaVersionRecorded {
                schema_version: "20260301000000".to_owned(),
            }]
        );
        assert!(sink.take().is_empty(), "take should drain events");
    }

    #[test]
    fn command_events_serialise_with_snake_case_tags() {
        let event = TelemetryEvent::CommandCompleted {
            command: "getrepo".to_owned(),
            outcome: CommandOutcome::TimedOut,
        };

        let json = serde_json::to_string(&event).expect("event should serialise");

        assert_eq!(
            json,
            r#"{"type":"command_completed","command":"getrepo","outcome":"timed_out"}"#
        );
    }
}
