//! Transition records: events, transitions and log entries.
//!
//! These are plain immutable values. A [`LogEntry`] is written once when a
//! transition is applied and never rewritten afterwards.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied metadata attached to one transition attempt.
///
/// # Example
///
/// ```rust
/// use checkstate::core::Event;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// let event = Event::at(at, "Changed first name");
/// assert_eq!(event.timestamp, at);
/// assert_eq!(event.description, "Changed first name");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the event happened
    pub timestamp: DateTime<Utc>,
    /// Human-readable reason for the transition
    pub description: String,
}

impl Event {
    /// Create an event at an explicit instant.
    pub fn at(timestamp: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
        }
    }

    /// Create an event stamped with the current time.
    pub fn now(description: impl Into<String>) -> Self {
        Self::at(Utc::now(), description)
    }
}

/// A directed edge between two states.
///
/// This is the unit of validation and of history comparison: two
/// transitions are equal when both endpoints are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: State,
    /// The state being transitioned to
    pub to: State,
}

impl StateTransition {
    pub fn new(from: impl Into<State>, to: impl Into<State>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Check if this transition leaves and re-enters the same state.
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for StateTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// One applied transition in a subject's log.
///
/// Field names are fixed so every storage backend persists the same shape:
/// `timestamp`, `from`, `to`, `description`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub from: State,
    pub to: State,
    pub description: String,
}

impl LogEntry {
    /// Build the entry recording `transition` as caused by `event`.
    pub fn record(event: &Event, transition: &StateTransition) -> Self {
        Self {
            timestamp: event.timestamp,
            from: transition.from.clone(),
            to: transition.to.clone(),
            description: event.description.clone(),
        }
    }

    /// The `(from, to)` pair of this entry.
    pub fn transition(&self) -> StateTransition {
        StateTransition {
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }

    /// Check if this entry records the given edge, ignoring event metadata.
    pub fn matches(&self, transition: &StateTransition) -> bool {
        self.from == transition.from && self.to == transition.to
    }
}
