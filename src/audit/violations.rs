//! Findings reported by a history audit.

use crate::core::State;
use thiserror::Error;

/// Inconsistency between a subject's log, its state and a graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditViolation {
    #[error("Log entry {index} starts at '{found}' but the previous entry ended at '{expected}'")]
    BrokenChain {
        index: usize,
        expected: State,
        found: State,
    },

    #[error("Last log entry ends at '{logged}' but the current state is '{current}'")]
    StateMismatch { logged: State, current: State },

    #[error("Log entry {index} records '{from}' -> '{to}', which the graph does not permit")]
    NotPermitted { index: usize, from: State, to: State },

    #[error("Current state '{state}' is unknown to the graph")]
    UnknownState { state: State },
}

impl AuditViolation {
    /// Index of the offending log entry, when the finding concerns one.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Self::BrokenChain { index, .. } | Self::NotPermitted { index, .. } => Some(*index),
            Self::StateMismatch { .. } | Self::UnknownState { .. } => None,
        }
    }
}
