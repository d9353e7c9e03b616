//! Permitted-transition graphs.
//!
//! A [`TransitionGraph`] maps each state to the states reachable from it in
//! one step. Graphs are usually parsed once from a declarative document:
//!
//! ```yaml
//! CREATED: [UPDATED]
//! UPDATED: [COMPLETED, UPDATED]
//! COMPLETED: []
//! ```
//!
//! Parsing checks syntax only. Unreachable states, isolated states and empty
//! destination lists are all legal, and a state with no entry at all is
//! simply terminal. Once built, a graph is never mutated.

pub mod builder;
pub mod macros;

pub use builder::TransitionGraphBuilder;

use crate::core::State;
use crate::error::{Error, GraphFormat, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

/// Edges as read from a document, before they become a graph.
///
/// A state declared twice is an error rather than a silent overwrite, so the
/// graph enforced is always the one written.
struct RawGraph(HashMap<State, Vec<State>>);

impl<'de> Deserialize<'de> for RawGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawGraphVisitor)
    }
}

struct RawGraphVisitor;

impl<'de> Visitor<'de> for RawGraphVisitor {
    type Value = RawGraph;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of state to destination list")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawGraph, A::Error> {
        let mut edges = HashMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(from) = map.next_key::<State>()? {
            if edges.contains_key(&from) {
                return Err(de::Error::custom(format_args!(
                    "state '{from}' is declared more than once"
                )));
            }
            let destinations: Option<Vec<State>> = map.next_value()?;
            edges.insert(from, destinations.unwrap_or_default());
        }
        Ok(RawGraph(edges))
    }
}

/// Immutable mapping from a state to its permitted destinations.
///
/// # Example
///
/// ```rust
/// use checkstate::graph::TransitionGraph;
///
/// let graph = TransitionGraph::from_yaml(b"A: [B]\nB: [C, B]\n").unwrap();
///
/// assert!(graph.permits("A", "B"));
/// assert!(graph.permits("B", "B"));
/// assert!(!graph.permits("B", "A"));
/// assert!(graph.contains("C"));
/// assert!(graph.is_terminal("C"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionGraph {
    edges: HashMap<State, Vec<State>>,
}

impl TransitionGraph {
    /// Start building a graph in code.
    pub fn builder() -> TransitionGraphBuilder {
        TransitionGraphBuilder::new()
    }

    /// Parse a graph from a YAML mapping of state to destination list.
    ///
    /// An empty document yields an empty graph; a state mapped to nothing
    /// (`DONE:`) gets an empty destination list.
    pub fn from_yaml(data: &[u8]) -> Result<Self> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let raw: Option<RawGraph> = serde_yaml::from_slice(data).map_err(Error::yaml)?;
        let graph = raw.map(Self::from_raw).unwrap_or_default();
        tracing::debug!(states = graph.len(), format = %GraphFormat::Yaml, "parsed transition graph");
        Ok(graph)
    }

    /// Parse a graph from a JSON object of state to destination array.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: Option<RawGraph> = serde_json::from_slice(data).map_err(Error::json)?;
        let graph = raw.map(Self::from_raw).unwrap_or_default();
        tracing::debug!(states = graph.len(), format = %GraphFormat::Json, "parsed transition graph");
        Ok(graph)
    }

    /// Load a graph document from disk.
    ///
    /// Files ending in `.json` are read as JSON, everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&data),
            _ => Self::from_yaml(&data),
        }
    }

    pub(crate) fn from_edges(edges: HashMap<State, Vec<State>>) -> Self {
        Self { edges }
    }

    fn from_raw(RawGraph(edges): RawGraph) -> Self {
        Self { edges }
    }

    /// Get the declared destinations of `state`, in declaration order.
    ///
    /// Returns `None` when the state has no entry of its own.
    pub fn destinations(&self, state: &str) -> Option<&[State]> {
        self.edges.get(state).map(Vec::as_slice)
    }

    /// Check if the graph declares the edge `from -> to`.
    pub fn permits(&self, from: &str, to: &str) -> bool {
        self.destinations(from)
            .is_some_and(|destinations| destinations.iter().any(|d| d == to))
    }

    /// Check if `state` is a key of the graph or a destination of any key.
    pub fn contains(&self, state: &str) -> bool {
        self.edges.contains_key(state)
            || self
                .edges
                .values()
                .any(|destinations| destinations.iter().any(|d| d == state))
    }

    /// Check if no move leaves `state`.
    pub fn is_terminal(&self, state: &str) -> bool {
        self.destinations(state).map_or(true, <[State]>::is_empty)
    }

    /// Every state the graph mentions, sorted and without duplicates.
    pub fn states(&self) -> Vec<&State> {
        let mut states = BTreeSet::new();
        for (from, destinations) in &self.edges {
            states.insert(from);
            states.extend(destinations);
        }
        states.into_iter().collect()
    }

    /// Iterate over `(state, destinations)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&State, &[State])> {
        self.edges
            .iter()
            .map(|(from, destinations)| (from, destinations.as_slice()))
    }

    /// Number of states with an entry of their own.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl Serialize for TransitionGraph {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        // sorted so documents written back are stable
        let sorted: BTreeMap<&State, &Vec<State>> = self.edges.iter().collect();
        sorted.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TransitionGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawGraph::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;

    const EXAMPLE: &str = "\
CREATED:
  - UPDATED
UPDATED:
  - COMPLETED
  - UPDATED
";

    fn destination_set<'a>(graph: &'a TransitionGraph, state: &str) -> HashSet<&'a str> {
        graph
            .destinations(state)
            .unwrap_or_default()
            .iter()
            .map(State::as_str)
            .collect()
    }

    #[test]
    fn yaml_yields_exact_destination_sets() {
        let graph = TransitionGraph::from_yaml(b"{A: [B], B: [C, B]}").unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(destination_set(&graph, "A"), HashSet::from(["B"]));
        assert_eq!(destination_set(&graph, "B"), HashSet::from(["C", "B"]));
        assert!(graph.destinations("C").is_none());
    }

    #[test]
    fn block_style_yaml_parses() {
        let graph = TransitionGraph::from_yaml(EXAMPLE.as_bytes()).unwrap();

        assert!(graph.permits("CREATED", "UPDATED"));
        assert!(graph.permits("UPDATED", "UPDATED"));
        assert!(graph.permits("UPDATED", "COMPLETED"));
        assert!(!graph.permits("COMPLETED", "CREATED"));
        assert!(!graph.permits("CREATED", "CREATED"));
    }

    #[test]
    fn destinations_keep_declaration_order() {
        let graph = TransitionGraph::from_yaml(b"B: [C, B, A]").unwrap();
        let names: Vec<_> = graph
            .destinations("B")
            .unwrap()
            .iter()
            .map(State::as_str)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn empty_and_null_destinations_are_terminal() {
        let graph = TransitionGraph::from_yaml(b"A: [B]\nB: []\nC:\n").unwrap();

        assert_eq!(graph.destinations("B"), Some(&[][..]));
        assert_eq!(graph.destinations("C"), Some(&[][..]));
        assert!(graph.is_terminal("B"));
        assert!(graph.is_terminal("C"));
        assert!(graph.is_terminal("MISSING"));
        assert!(!graph.is_terminal("A"));
    }

    #[test]
    fn duplicate_destinations_are_kept() {
        let graph = TransitionGraph::from_yaml(b"A: [B, B]").unwrap();
        assert_eq!(graph.destinations("A").unwrap().len(), 2);
        assert!(graph.permits("A", "B"));
    }

    #[test]
    fn empty_document_yields_empty_graph() {
        assert!(TransitionGraph::from_yaml(b"").unwrap().is_empty());
        assert!(TransitionGraph::from_yaml(b"  \n").unwrap().is_empty());
        assert!(TransitionGraph::from_json(b"null").unwrap().is_empty());
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = TransitionGraph::from_yaml(b"A: [B\nB: C: D").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn nested_mappings_are_rejected() {
        let err = TransitionGraph::from_yaml(b"A:\n  B: [C]\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = TransitionGraph::from_yaml(b"- A\n- B\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn repeated_yaml_state_is_parse_error() {
        let err = TransitionGraph::from_yaml(b"A: [B]\nA: [C]\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("'A'"), "{err}");
    }

    #[test]
    fn repeated_json_state_is_parse_error() {
        let err = TransitionGraph::from_json(br#"{"A": ["B"], "A": ["C"]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("'A'"), "{err}");
    }

    #[test]
    fn repeated_state_is_rejected_through_serde() {
        let result = serde_json::from_str::<TransitionGraph>(r#"{"A": [], "A": ["B"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn json_and_yaml_agree() {
        let from_json =
            TransitionGraph::from_json(br#"{"A": ["B"], "B": ["C", "B"], "C": []}"#).unwrap();
        let from_yaml = TransitionGraph::from_yaml(b"A: [B]\nB: [C, B]\nC: []\n").unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = TransitionGraph::from_json(br#"{"A": "B"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn contains_covers_keys_and_destinations() {
        let graph = TransitionGraph::from_yaml(b"A: [B]").unwrap();
        assert!(graph.contains("A"));
        assert!(graph.contains("B"));
        assert!(!graph.contains("C"));
    }

    #[test]
    fn states_are_sorted_and_unique() {
        let graph = TransitionGraph::from_yaml(b"B: [C, A]\nA: [B]\n").unwrap();
        let states: Vec<_> = graph.states().into_iter().map(State::as_str).collect();
        assert_eq!(states, vec!["A", "B", "C"]);
    }

    #[test]
    fn iter_visits_every_entry() {
        let graph = TransitionGraph::from_yaml(b"A: [B]\nB: []\n").unwrap();
        let mut entries: Vec<_> = graph
            .iter()
            .map(|(from, to)| (from.as_str(), to.len()))
            .collect();
        entries.sort_unstable();
        assert_eq!(entries, vec![("A", 1), ("B", 0)]);
    }

    #[test]
    fn graph_serializes_back_to_mapping() {
        let graph = TransitionGraph::from_yaml(EXAMPLE.as_bytes()).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(
            json,
            r#"{"CREATED":["UPDATED"],"UPDATED":["COMPLETED","UPDATED"]}"#
        );

        let reparsed = TransitionGraph::from_json(json.as_bytes()).unwrap();
        assert_eq!(reparsed, graph);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TransitionGraph::from_path("does/not/exist.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn path_extension_selects_format() {
        let dir = std::env::temp_dir();
        let json_path = dir.join(format!("checkstate-{}.json", uuid::Uuid::new_v4()));
        let yaml_path = dir.join(format!("checkstate-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(&json_path, br#"{"A": ["B"]}"#).unwrap();
        std::fs::write(&yaml_path, b"A: [B]\n").unwrap();

        let from_json = TransitionGraph::from_path(&json_path).unwrap();
        let from_yaml = TransitionGraph::from_path(&yaml_path).unwrap();

        std::fs::remove_file(&json_path).unwrap();
        std::fs::remove_file(&yaml_path).unwrap();

        assert_eq!(from_json, from_yaml);
        assert!(from_json.permits("A", "B"));
    }
}
