//! The state machine engine.
//!
//! A [`StateMachine`] binds one [`TransitionGraph`](crate::graph::TransitionGraph)
//! to one [`Subject`](crate::core::Subject) for the duration of a call
//! sequence. It is never persisted: load the subject, create a machine,
//! move, then store the subject again.
//!
//! # Guarantees
//!
//! - Creation fails unless the subject's state is known to the graph.
//! - A move either appends exactly one log entry and updates the state, or
//!   changes nothing at all.
//! - History queries read the subject's log only; they never consult the
//!   graph.

mod state_machine;

pub use state_machine::StateMachine;
