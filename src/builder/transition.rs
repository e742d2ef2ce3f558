//! Builder for constructing a single transition.

use crate::builder::error::BuildError;
use crate::core::{Context, Event, Guard, State};

/// A fully specified transition ready to be added to a table.
pub struct TransitionSpec<S: State, E: Event> {
    pub(crate) from: S,
    pub(crate) event: E,
    pub(crate) to: S,
    pub(crate) guard: Option<Guard<S>>,
}

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use statekit::builder::TransitionBuilder;
/// use statekit::StateMachineBuilder;
///
/// let machine = StateMachineBuilder::<&str, &str>::new()
///     .initial("draft")
///     .with_transition(
///         TransitionBuilder::new()
///             .from("draft")
///             .on("submit")
///             .to("review")
///             .when(|ctx| ctx.data().contains_key("author")),
///     )
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.states(), vec!["draft", "review"]);
/// ```
pub struct TransitionBuilder<S: State, E: Event> {
    from: Option<S>,
    event: Option<E>,
    to: Option<S>,
    guard: Option<Guard<S>>,
}

impl<S: State, E: Event> TransitionBuilder<S, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Context<S>) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionSpec<S, E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionSpec {
            from,
            event,
            to,
            guard: self.guard,
        })
    }
}

impl<S: State, E: Event> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
