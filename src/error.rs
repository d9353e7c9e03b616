//! Errors returned by graph loading and state machine operations.

use crate::core::{BoxError, State, StateTransition};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Source format of a transition graph document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Yaml,
    Json,
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("YAML"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// Coarse classification of an [`Error`], stable across causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The graph document was malformed
    Parse,
    /// The graph document could not be read
    Io,
    /// The subject's state is unknown to the graph
    InvalidInitialState,
    /// The graph does not permit the requested edge
    IllegalTransition,
    /// The subject failed to record the log entry
    LogAppend,
}

/// Errors that can occur while loading graphs and driving subjects.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse {format} transition graph: {source}")]
    Parse {
        format: GraphFormat,
        #[source]
        source: BoxError,
    },

    #[error("failed to read transition graph from '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("current state '{state}' is not defined in permitted state transitions")]
    InvalidInitialState { state: State },

    #[error("invalid state transition from '{from}' to '{to}' triggered by event: {description}")]
    IllegalTransition {
        from: State,
        to: State,
        description: String,
    },

    #[error("failed to append log entry for transition {transition}: {source}")]
    LogAppend {
        transition: StateTransition,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidInitialState { .. } => ErrorKind::InvalidInitialState,
            Self::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            Self::LogAppend { .. } => ErrorKind::LogAppend,
        }
    }

    pub(crate) fn yaml(source: serde_yaml::Error) -> Self {
        Self::Parse {
            format: GraphFormat::Yaml,
            source: Box::new(source),
        }
    }

    pub(crate) fn json(source: serde_json::Error) -> Self {
        Self::Parse {
            format: GraphFormat::Json,
            source: Box::new(source),
        }
    }
}

/// Result alias for fallible checkstate operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
