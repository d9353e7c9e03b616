//! Validation-based audit of transition histories.
//!
//! A state machine only guarantees consistency for moves it applied itself.
//! Logs that were edited by hand, merged from another store or written under
//! an older graph can drift. The audit reads a state and its log and reports
//! every inconsistency at once, using Stillwater's `Validation` to
//! accumulate findings rather than stopping at the first.
//!
//! Auditing is read-only and independent of the engine:
//! [`StateMachine::move_to`](crate::machine::StateMachine::move_to) and
//! [`StateMachine::have_moved`](crate::machine::StateMachine::have_moved)
//! never consult it.
//!
//! # Example
//!
//! ```rust
//! use checkstate::core::{Event, LogEntry, StateTransition, TrackedState};
//! use checkstate::transition_graph;
//! use stillwater::validation::Validation;
//!
//! let graph = transition_graph! { "A" => ["B"], "B" => ["C"] };
//! let log = vec![LogEntry::record(&Event::now("skip"), &StateTransition::new("A", "C"))];
//! let tracking = TrackedState::with_log("B", log);
//!
//! match tracking.audit(&graph) {
//!     Validation::Failure(violations) => assert_eq!(violations.len(), 2),
//!     Validation::Success(_) => panic!("expected violations"),
//! }
//! ```

pub mod violations;

pub use violations::AuditViolation;

use crate::core::{LogEntry, State, TrackedState};
use crate::graph::TransitionGraph;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of an audit: success, or every violation found.
pub type AuditResult = Validation<(), NonEmptyVec<AuditViolation>>;

/// Check that each log entry starts where the previous one ended.
pub fn audit_chain(log: &[LogEntry]) -> AuditResult {
    let checks: Vec<AuditResult> = log
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            if pair[1].from == pair[0].to {
                Validation::success(())
            } else {
                Validation::fail(AuditViolation::BrokenChain {
                    index: i + 1,
                    expected: pair[0].to.clone(),
                    found: pair[1].from.clone(),
                })
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// Audit a state and its log against `graph`, accumulating ALL violations.
///
/// Reports a broken chain between consecutive entries, a last entry that
/// does not end at `current`, logged edges the graph does not permit, and a
/// current state the graph does not know. An empty log with a known state
/// passes.
pub fn audit_history(current: &State, log: &[LogEntry], graph: &TransitionGraph) -> AuditResult {
    let mut checks: Vec<AuditResult> = Vec::new();

    if !graph.contains(current.as_str()) {
        checks.push(Validation::fail(AuditViolation::UnknownState {
            state: current.clone(),
        }));
    }

    checks.push(audit_chain(log));

    for (index, entry) in log.iter().enumerate() {
        if !graph.permits(entry.from.as_str(), entry.to.as_str()) {
            checks.push(Validation::fail(AuditViolation::NotPermitted {
                index,
                from: entry.from.clone(),
                to: entry.to.clone(),
            }));
        }
    }

    if let Some(last) = log.last() {
        if last.to != *current {
            checks.push(Validation::fail(AuditViolation::StateMismatch {
                logged: last.to.clone(),
                current: current.clone(),
            }));
        }
    }

    let result = Validation::all_vec(checks).map(|_| ());
    if let Validation::Failure(violations) = &result {
        tracing::warn!(
            state = %current,
            entries = log.len(),
            violations = violations.len(),
            "transition history failed audit"
        );
    }
    result
}

impl TrackedState {
    /// Audit this state and its log against `graph`.
    pub fn audit(&self, graph: &TransitionGraph) -> AuditResult {
        audit_history(self.state(), self.log(), graph)
    }
}
