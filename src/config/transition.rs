//! Configured transitions and the read-only view exporters consume.

use crate::core::{Event, Guard, State};

/// A configured `(event, target, guard?)` edge out of a source state.
///
/// The source state is the registry key the transition is stored under.
#[derive(Debug)]
pub struct Transition<S: State, E: Event> {
    pub(crate) event: E,
    pub(crate) to: S,
    pub(crate) guard: Option<Guard<S>>,
}

impl<S: State, E: Event> Transition<S, E> {
    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn target(&self) -> &S {
        &self.to
    }

    pub fn guard(&self) -> Option<&Guard<S>> {
        self.guard.as_ref()
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Whether this edge listens for `event` (guards not consulted).
    pub fn accepts(&self, event: &E) -> bool {
        self.event == *event
    }
}

/// Borrowed description of one configured transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionInfo<'a, S, E> {
    pub from: &'a S,
    pub event: &'a E,
    pub to: &'a S,
    pub guarded: bool,
}
