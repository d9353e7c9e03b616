//! Builder for constructing transition graphs in code.

use crate::core::State;
use crate::graph::TransitionGraph;
use std::collections::HashMap;

/// Builder for constructing transition graphs with a fluent API.
///
/// # Example
///
/// ```rust
/// use checkstate::graph::TransitionGraphBuilder;
///
/// let graph = TransitionGraphBuilder::new()
///     .allow("CREATED", "UPDATED")
///     .allow_all("UPDATED", ["COMPLETED", "UPDATED"])
///     .state("COMPLETED")
///     .build();
///
/// assert!(graph.permits("UPDATED", "UPDATED"));
/// assert!(graph.is_terminal("COMPLETED"));
/// ```
#[derive(Debug, Default)]
pub struct TransitionGraphBuilder {
    edges: HashMap<State, Vec<State>>,
}

impl TransitionGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state with its own entry, even if nothing leaves it.
    pub fn state(mut self, state: impl Into<State>) -> Self {
        self.edges.entry(state.into()).or_default();
        self
    }

    /// Permit a single edge.
    pub fn allow(mut self, from: impl Into<State>, to: impl Into<State>) -> Self {
        self.edges.entry(from.into()).or_default().push(to.into());
        self
    }

    /// Permit every edge from `from` to each of `destinations`.
    pub fn allow_all<I>(mut self, from: impl Into<State>, destinations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<State>,
    {
        self.edges
            .entry(from.into())
            .or_default()
            .extend(destinations.into_iter().map(Into::into));
        self
    }

    /// Freeze the declared edges into an immutable graph.
    pub fn build(self) -> TransitionGraph {
        TransitionGraph::from_edges(self.edges)
    }
}
