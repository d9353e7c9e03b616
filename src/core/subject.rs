//! The capability contract a host entity exposes to the engine.
//!
//! The engine never owns a host's storage. It reads and writes state and
//! appends log entries only through [`Subject`]. Most hosts do not implement
//! the contract by hand: they embed a [`TrackedState`] and point at it with
//! [`Tracked`], which supplies [`Subject`] through a blanket impl.

use super::history::{Event, LogEntry, StateTransition};
use super::state::State;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque error returned by a subject whose log append can fail.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Operations a host entity must provide to be driven by a state machine.
///
/// # Example
///
/// ```rust
/// use checkstate::core::{BoxError, Event, State, StateTransition, Subject};
///
/// struct Ticket {
///     status: State,
///     history: Vec<StateTransition>,
/// }
///
/// impl Subject for Ticket {
///     fn current_state(&self) -> &State {
///         &self.status
///     }
///
///     fn set_checked_state(&mut self, state: State) {
///         self.status = state;
///     }
///
///     fn append_log_entry(
///         &mut self,
///         _event: &Event,
///         transition: &StateTransition,
///     ) -> Result<(), BoxError> {
///         self.history.push(transition.clone());
///         Ok(())
///     }
///
///     fn previous_transitions(&self) -> Vec<StateTransition> {
///         self.history.clone()
///     }
/// }
/// ```
pub trait Subject {
    /// Get the subject's current state.
    fn current_state(&self) -> &State;

    /// Overwrite the current state.
    ///
    /// The subject performs no validation; the engine only calls this after
    /// checking the graph.
    fn set_checked_state(&mut self, state: State);

    /// Append one entry to the subject's transition log.
    ///
    /// A failure here aborts the transition before the state is changed.
    fn append_log_entry(
        &mut self,
        event: &Event,
        transition: &StateTransition,
    ) -> Result<(), BoxError>;

    /// Every logged transition, in log order.
    fn previous_transitions(&self) -> Vec<StateTransition>;
}

/// Default state and log storage for host entities.
///
/// Persists as `{ "state": ..., "stateTransitionLog": [...] }`.
///
/// Reading is more lenient than writing. Documents that stored the state
/// under `"string"` load, and a `null` or missing log loads as empty. The
/// state is always written back as `"state"`, so readers that only know the
/// `"string"` field cannot load documents this type has saved.
///
/// # Example
///
/// ```rust
/// use checkstate::core::{Tracked, TrackedState};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Contact {
///     #[serde(flatten)]
///     tracking: TrackedState,
///     email: String,
/// }
///
/// impl Tracked for Contact {
///     fn tracked(&self) -> &TrackedState {
///         &self.tracking
///     }
///
///     fn tracked_mut(&mut self) -> &mut TrackedState {
///         &mut self.tracking
///     }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedState {
    #[serde(alias = "string")]
    state: State,
    #[serde(
        rename = "stateTransitionLog",
        default,
        deserialize_with = "null_as_empty"
    )]
    log: Vec<LogEntry>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<LogEntry>, D::Error> {
    Option::<Vec<LogEntry>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl TrackedState {
    /// Create tracking for an entity in `state` with an empty log.
    pub fn new(state: impl Into<State>) -> Self {
        Self {
            state: state.into(),
            log: Vec::new(),
        }
    }

    /// Rehydrate tracking from previously persisted parts.
    pub fn with_log(state: impl Into<State>, log: Vec<LogEntry>) -> Self {
        Self {
            state: state.into(),
            log,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Get the full transition log.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn last_entry(&self) -> Option<&LogEntry> {
        self.log.last()
    }
}

/// Delegation hook for hosts that embed a [`TrackedState`].
///
/// Implementing this trait is enough to make a type a [`Subject`].
pub trait Tracked {
    fn tracked(&self) -> &TrackedState;
    fn tracked_mut(&mut self) -> &mut TrackedState;
}

impl Tracked for TrackedState {
    fn tracked(&self) -> &TrackedState {
        self
    }

    fn tracked_mut(&mut self) -> &mut TrackedState {
        self
    }
}

impl<T: Tracked + ?Sized> Subject for T {
    fn current_state(&self) -> &State {
        &self.tracked().state
    }

    fn set_checked_state(&mut self, state: State) {
        self.tracked_mut().state = state;
    }

    fn append_log_entry(
        &mut self,
        event: &Event,
        transition: &StateTransition,
    ) -> Result<(), BoxError> {
        self.tracked_mut()
            .log
            .push(LogEntry::record(event, transition));
        Ok(())
    }

    fn previous_transitions(&self) -> Vec<StateTransition> {
        self.tracked().log.iter().map(LogEntry::transition).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[derive(Debug, Serialize, Deserialize)]
    struct Contact {
        #[serde(flatten)]
        tracking: TrackedState,
        #[serde(rename = "firstName")]
        first_name: String,
    }

    impl Tracked for Contact {
        fn tracked(&self) -> &TrackedState {
            &self.tracking
        }

        fn tracked_mut(&mut self) -> &mut TrackedState {
            &mut self.tracking
        }
    }

    #[test]
    fn new_tracking_has_empty_log() {
        let tracking = TrackedState::new("CREATED");
        assert_eq!(tracking.state(), "CREATED");
        assert!(tracking.log().is_empty());
        assert!(tracking.last_entry().is_none());
        assert!(tracking.previous_transitions().is_empty());
    }

    #[test]
    fn append_records_event_metadata() {
        let mut tracking = TrackedState::new("CREATED");
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        tracking
            .append_log_entry(
                &Event::at(at, "edit"),
                &StateTransition::new("CREATED", "UPDATED"),
            )
            .unwrap();

        let entry = tracking.last_entry().unwrap();
        assert_eq!(entry.timestamp, at);
        assert_eq!(entry.description, "edit");
        // appending never touches the state itself
        assert_eq!(tracking.state(), "CREATED");
    }

    #[test]
    fn previous_transitions_follow_log_order() {
        let mut tracking = TrackedState::new("A");
        tracking
            .append_log_entry(&Event::now("1"), &StateTransition::new("A", "B"))
            .unwrap();
        tracking
            .append_log_entry(&Event::now("2"), &StateTransition::new("B", "C"))
            .unwrap();

        assert_eq!(
            tracking.previous_transitions(),
            vec![StateTransition::new("A", "B"), StateTransition::new("B", "C")]
        );
    }

    #[test]
    fn embedded_tracking_delegates_subject() {
        let mut contact = Contact {
            tracking: TrackedState::new("CREATED"),
            first_name: "Tim".to_string(),
        };

        contact.set_checked_state(State::from("UPDATED"));
        assert_eq!(contact.current_state(), "UPDATED");
        assert_eq!(contact.tracking.state(), "UPDATED");
    }

    #[test]
    fn persisted_shape_uses_fixed_field_names() {
        let mut contact = Contact {
            tracking: TrackedState::new("CREATED"),
            first_name: "Tim".to_string(),
        };
        contact
            .append_log_entry(
                &Event::now("edit"),
                &StateTransition::new("CREATED", "UPDATED"),
            )
            .unwrap();

        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(value["state"], "CREATED");
        assert_eq!(value["firstName"], "Tim");
        assert_eq!(value["stateTransitionLog"][0]["from"], "CREATED");
        assert_eq!(value["stateTransitionLog"][0]["to"], "UPDATED");
        assert_eq!(value["stateTransitionLog"][0]["description"], "edit");
    }

    #[test]
    fn legacy_state_field_is_accepted() {
        let json = r#"{"string": "UPDATED", "stateTransitionLog": []}"#;
        let tracking: TrackedState = serde_json::from_str(json).unwrap();
        assert_eq!(tracking.state(), "UPDATED");

        let json = r#"{"string": "UPDATED", "stateTransitionLog": null}"#;
        let tracking: TrackedState = serde_json::from_str(json).unwrap();
        assert_eq!(tracking.state(), "UPDATED");
        assert!(tracking.log().is_empty());
    }

    #[test]
    fn legacy_document_loads_into_embedding_host() {
        let json = r#"{"firstName": "Tim", "string": "CREATED", "stateTransitionLog": null}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();

        assert_eq!(contact.current_state(), "CREATED");
        assert!(contact.previous_transitions().is_empty());
        assert_eq!(contact.first_name, "Tim");
    }

    #[test]
    fn state_is_written_back_under_its_own_name() {
        let tracking: TrackedState =
            serde_json::from_str(r#"{"string": "UPDATED", "stateTransitionLog": null}"#).unwrap();

        let value = serde_json::to_value(&tracking).unwrap();
        assert_eq!(value["state"], "UPDATED");
        assert!(value.get("string").is_none());
        assert_eq!(value["stateTransitionLog"], serde_json::json!([]));
    }

    #[test]
    fn missing_log_defaults_to_empty() {
        let tracking: TrackedState = serde_json::from_str(r#"{"state": "CREATED"}"#).unwrap();
        assert!(tracking.log().is_empty());
    }
}
