//! State machine that validates and applies transitions on a subject.

use crate::core::{Event, State, StateTransition, Subject};
use crate::error::{Error, Result};
use crate::graph::TransitionGraph;

/// Engine bound to one subject and one graph.
///
/// The machine holds the subject by exclusive borrow, so nothing else can
/// write the subject's state or log while the machine is alive.
///
/// # Example
///
/// ```rust
/// use checkstate::core::{Event, StateTransition, TrackedState};
/// use checkstate::graph::TransitionGraph;
/// use checkstate::machine::StateMachine;
///
/// let graph = TransitionGraph::from_yaml(
///     b"CREATED: [UPDATED]\nUPDATED: [COMPLETED, UPDATED]\n",
/// )
/// .unwrap();
/// let mut document = TrackedState::new("CREATED");
///
/// let mut machine = StateMachine::create(&mut document, &graph).unwrap();
/// machine.move_to(&Event::now("edit"), "UPDATED").unwrap();
/// assert!(machine.have_moved(&StateTransition::new("CREATED", "UPDATED")));
///
/// assert_eq!(document.state(), "UPDATED");
/// assert_eq!(document.log().len(), 1);
/// ```
pub struct StateMachine<'a, S: Subject + ?Sized> {
    subject: &'a mut S,
    graph: &'a TransitionGraph,
}

impl<'a, S: Subject + ?Sized> StateMachine<'a, S> {
    /// Bind `subject` to `graph`.
    ///
    /// The subject's current state must be a key of the graph or a
    /// destination of some key. On failure the subject is left untouched.
    pub fn create(subject: &'a mut S, graph: &'a TransitionGraph) -> Result<Self> {
        let current = subject.current_state().clone();
        if !graph.contains(current.as_str()) {
            tracing::warn!(state = %current, "state is not defined in permitted state transitions");
            return Err(Error::InvalidInitialState { state: current });
        }

        tracing::debug!(state = %current, graph_states = graph.len(), "created state machine");
        subject.set_checked_state(current);

        Ok(Self { subject, graph })
    }

    /// Move the subject to `target`, recording `event` in its log.
    ///
    /// The edge from the current state to `target` must be declared in the
    /// graph; self-transitions need an explicit self edge. The log entry is
    /// appended before the state changes, and a failed append leaves the
    /// state as it was.
    pub fn move_to(&mut self, event: &Event, target: impl Into<State>) -> Result<()> {
        let from = self.subject.current_state().clone();
        let to = target.into();

        if !self.graph.permits(from.as_str(), to.as_str()) {
            tracing::warn!(
                from = %from,
                to = %to,
                event = %event.description,
                "rejected illegal state transition"
            );
            return Err(Error::IllegalTransition {
                from,
                to,
                description: event.description.clone(),
            });
        }

        let transition = StateTransition { from, to };
        if let Err(source) = self.subject.append_log_entry(event, &transition) {
            tracing::warn!(%transition, error = %source, "failed to append log entry");
            return Err(Error::LogAppend { transition, source });
        }

        tracing::info!(
            from = %transition.from,
            to = %transition.to,
            event = %event.description,
            "applied state transition"
        );
        self.subject.set_checked_state(transition.to);

        Ok(())
    }

    /// Check if the subject's log contains the edge `transition`.
    ///
    /// Timestamps, descriptions and repetition are ignored, and the graph is
    /// not consulted: an edge taken under an older graph still counts.
    pub fn have_moved(&self, transition: &StateTransition) -> bool {
        self.subject
            .previous_transitions()
            .iter()
            .any(|previous| previous == transition)
    }

    /// Check if `target` is a permitted next state (pure).
    pub fn can_move_to(&self, target: &str) -> bool {
        self.graph
            .permits(self.subject.current_state().as_str(), target)
    }

    /// Destinations the graph permits from the current state.
    pub fn permitted_destinations(&self) -> &'a [State] {
        self.graph
            .destinations(self.subject.current_state().as_str())
            .unwrap_or_default()
    }

    /// Check if no move can leave the current state.
    pub fn is_terminal(&self) -> bool {
        self.graph
            .is_terminal(self.subject.current_state().as_str())
    }

    pub fn current_state(&self) -> &State {
        self.subject.current_state()
    }

    pub fn subject(&self) -> &S {
        &*self.subject
    }

    pub fn graph(&self) -> &'a TransitionGraph {
        self.graph
    }

    /// Release the machine, handing back the subject borrow.
    pub fn into_subject(self) -> &'a mut S {
        self.subject
    }
}
