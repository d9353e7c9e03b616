//! Core value types and the subject contract.
//!
//! This module contains what every other part of the crate builds on:
//! - Opaque state identifiers via `State`
//! - Events, transitions and immutable log entries
//! - The `Subject` capability contract and its default `TrackedState`
//!   implementation

mod history;
mod state;
mod subject;

pub use history::{Event, LogEntry, StateTransition};
pub use state::State;
pub use subject::{BoxError, Subject, Tracked, TrackedState};
