//! Checkstate: declarative transition policies for stateful documents
//!
//! Checkstate enforces a permitted-transition graph on any host entity and
//! records every transition it permits in the entity's own log. It owns no
//! storage: hosts expose their state and log through the `Subject` trait
//! (usually by embedding a `TrackedState`), and the engine validates and
//! applies moves against an immutable `TransitionGraph`.
//!
//! # Core Concepts
//!
//! - **Graph**: State → permitted destinations, parsed once from YAML or JSON
//! - **Subject**: the host entity's state and append-only transition log
//! - **State machine**: short-lived binding of one subject to one graph
//! - **Audit**: read-only consistency report of a log against a graph
//!
//! # Example
//!
//! ```rust
//! use checkstate::{Event, StateMachine, StateTransition, TrackedState, TransitionGraph};
//!
//! let graph = TransitionGraph::from_yaml(b"
//! CREATED: [UPDATED]
//! UPDATED: [COMPLETED, UPDATED]
//! ").unwrap();
//!
//! let mut document = TrackedState::new("CREATED");
//! let mut machine = StateMachine::create(&mut document, &graph).unwrap();
//!
//! machine.move_to(&Event::now("edit"), "UPDATED").unwrap();
//! machine.move_to(&Event::now("finish"), "COMPLETED").unwrap();
//! assert!(machine.move_to(&Event::now("revert"), "CREATED").is_err());
//! assert!(machine.have_moved(&StateTransition::new("UPDATED", "COMPLETED")));
//!
//! assert_eq!(document.state(), "COMPLETED");
//! assert_eq!(document.log().len(), 2);
//! ```

pub mod audit;
pub mod core;
pub mod error;
pub mod graph;
pub mod machine;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{Event, LogEntry, State, StateTransition, Subject, Tracked, TrackedState};
pub use error::{Error, ErrorKind, Result};
pub use graph::TransitionGraph;
pub use machine::StateMachine;
