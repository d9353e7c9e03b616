//! Versioned snapshots of tracked state.
//!
//! A [`Snapshot`] captures a subject's current state and full transition log
//! so a persistence layer can store it as JSON (readable) or bincode
//! (compact) and rehydrate it later. Snapshots never contain the graph.

use crate::audit::{audit_chain, AuditResult, AuditViolation};
use crate::core::{LogEntry, State, Tracked, TrackedState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;

pub mod error;

pub use error::{SnapshotEncoding, SnapshotError};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a subject's state and log.
///
/// # Example
///
/// ```rust
/// use checkstate::core::TrackedState;
/// use checkstate::snapshot::Snapshot;
///
/// let tracking = TrackedState::new("CREATED");
/// let json = Snapshot::capture(&tracking).to_json().unwrap();
///
/// let restored = Snapshot::from_json(&json).unwrap().restore();
/// assert_eq!(restored, tracking);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// State at capture time
    pub state: State,

    /// Complete transition log at capture time
    #[serde(rename = "stateTransitionLog")]
    pub log: Vec<LogEntry>,
}

impl Snapshot {
    /// Capture the tracked state of `subject`.
    pub fn capture<T: Tracked + ?Sized>(subject: &T) -> Self {
        let tracking = subject.tracked();
        let snapshot = Self {
            version: SNAPSHOT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            state: tracking.state().clone(),
            log: tracking.log().to_vec(),
        };
        tracing::debug!(
            id = %snapshot.id,
            state = %snapshot.state,
            entries = snapshot.log.len(),
            "captured snapshot"
        );
        snapshot
    }

    /// Rebuild the tracked state this snapshot was taken from.
    pub fn restore(&self) -> TrackedState {
        TrackedState::with_log(self.state.clone(), self.log.clone())
    }

    /// Check version and log consistency.
    ///
    /// The log must chain (each entry starts where the previous ended) and
    /// its last entry must end at the captured state. Every inconsistency is
    /// reported together in [`SnapshotError::InconsistentLog`].
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let ends_at_state: AuditResult = match self.log.last() {
            Some(last) if last.to != self.state => Validation::fail(AuditViolation::StateMismatch {
                logged: last.to.clone(),
                current: self.state.clone(),
            }),
            _ => Validation::success(()),
        };

        match Validation::all_vec(vec![audit_chain(&self.log), ends_at_state]) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => {
                tracing::warn!(
                    id = %self.id,
                    violations = violations.len(),
                    "rejected snapshot with inconsistent log"
                );
                Err(SnapshotError::InconsistentLog {
                    id: self.id.clone(),
                    violations: violations.iter().cloned().collect(),
                })
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::encode(SnapshotEncoding::Json, e))
    }

    /// Load and validate a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::decode(SnapshotEncoding::Json, e))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::encode(SnapshotEncoding::Binary, e))
    }

    /// Load and validate a snapshot from its binary encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::decode(SnapshotEncoding::Binary, e))?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}
