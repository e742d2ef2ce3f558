//! Ordered record of entered states.

use super::state::State;

/// Ordered, append-only list of entered states.
///
/// The first entry is always the machine's initial state. Each committed
/// transition appends its target, so repeats are expected when a machine
/// cycles.
///
/// # Example
///
/// ```rust
/// use statekit::core::History;
///
/// let mut history = History::new("idle");
/// history.record("running");
/// history.record("idle");
///
/// assert_eq!(history.states(), &["idle", "running", "idle"]);
/// assert_eq!(history.initial(), &"idle");
/// assert_eq!(history.visits(&"idle"), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct History<S: State> {
    states: Vec<S>,
}

impl<S: State> History<S> {
    /// Start a history at `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            states: vec![initial],
        }
    }

    /// Rebuild a history from decoded states.
    ///
    /// Callers must have checked that `states` is non-empty.
    pub(crate) fn from_states(states: Vec<S>) -> Self {
        debug_assert!(!states.is_empty());
        Self { states }
    }

    /// Append an entered state.
    pub fn record(&mut self, state: S) {
        self.states.push(state);
    }

    /// All entered states, oldest first.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn initial(&self) -> &S {
        &self.states[0]
    }

    /// Most recently entered state.
    pub fn last(&self) -> &S {
        &self.states[self.states.len() - 1]
    }

    /// Number of entries, including the initial state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false; pairs with `len` for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// How many times `state` was entered (the initial entry counts).
    pub fn visits(&self, state: &S) -> usize {
        self.states.iter().filter(|s| *s == state).count()
    }

    /// Consecutive `(from, to)` pairs in the order they were committed.
    pub fn steps(&self) -> impl Iterator<Item = (&S, &S)> {
        self.states.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Owned copy of the entries.
    pub fn to_vec(&self) -> Vec<S> {
        self.states.clone()
    }
}
