//! Snapshot error types.

use crate::audit::AuditViolation;
use crate::core::BoxError;
use std::fmt;
use thiserror::Error;

/// Wire encoding of a stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotEncoding {
    Json,
    Binary,
}

impl fmt::Display for SnapshotEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// Errors that can occur while storing or loading snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot as {encoding}: {source}")]
    Encode {
        encoding: SnapshotEncoding,
        #[source]
        source: BoxError,
    },

    #[error("failed to decode {encoding} snapshot: {source}")]
    Decode {
        encoding: SnapshotEncoding,
        #[source]
        source: BoxError,
    },

    #[error("snapshot format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The stored log does not chain or does not end at the stored state.
    #[error("snapshot {id} has an inconsistent transition log: {}", describe(.violations))]
    InconsistentLog {
        id: String,
        violations: Vec<AuditViolation>,
    },
}

impl SnapshotError {
    pub(crate) fn encode(encoding: SnapshotEncoding, source: impl Into<BoxError>) -> Self {
        Self::Encode {
            encoding,
            source: source.into(),
        }
    }

    pub(crate) fn decode(encoding: SnapshotEncoding, source: impl Into<BoxError>) -> Self {
        Self::Decode {
            encoding,
            source: source.into(),
        }
    }

    /// Audit findings behind a rejected log, empty for other errors.
    pub fn violations(&self) -> &[AuditViolation] {
        match self {
            Self::InconsistentLog { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn describe(violations: &[AuditViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
