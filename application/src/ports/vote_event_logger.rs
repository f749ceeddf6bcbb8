//! Port for structured vote-event logging.
//!
//! Defines the [`VoteEventLogger`] trait for recording engine events (option
//! creation, correlation initialization, votes, correlation updates) to a
//! structured audit log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the event
//! stream in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured engine event for logging.
pub struct VoteEvent {
    /// Event type identifier (e.g., "vote_recorded", "correlations_updated").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl VoteEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging engine events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that logging never
/// interrupts a vote; failures are dropped by the implementation.
pub trait VoteEventLogger: Send + Sync {
    /// Record an engine event.
    fn log(&self, event: VoteEvent);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoEventLogger;

impl VoteEventLogger for NoEventLogger {
    fn log(&self, _event: VoteEvent) {}
}
