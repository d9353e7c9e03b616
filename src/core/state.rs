//! Opaque state identifiers.
//!
//! A state is nothing more than a name. The engine attaches no hierarchy,
//! wildcard, or ordering meaning to it; two states are the same exactly when
//! their names are equal.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a state in a transition graph.
///
/// Serializes as a bare string so graph documents and persisted logs stay
/// readable.
///
/// # Example
///
/// ```rust
/// use checkstate::core::State;
///
/// let created = State::from("CREATED");
/// assert_eq!(created.as_str(), "CREATED");
/// assert_eq!(created, "CREATED");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    /// Create a state from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the state's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the state, returning its name.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for State {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&State> for State {
    fn from(state: &State) -> Self {
        state.clone()
    }
}

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
