//! Configuration store: transition table plus callback and hook registries.
//!
//! A configuration is built during a single-threaded setup phase and is
//! read-only afterwards. Machines hold it behind an `Arc`, so several
//! instances can share one table while each owns its own runtime state.

mod callback;
mod registry;
mod transition;
mod validate;

pub use callback::{BoxError, Callback, CallbackResult, TransitionHook};
pub use transition::{Transition, TransitionInfo};
pub use validate::ConfigIssue;

use crate::core::{Context, Event, Guard, State};
use registry::Registry;
use std::fmt;

/// Mutable tables shared by [`Configuration`] and the builder.
pub(crate) struct Tables<S: State, E: Event> {
    pub(crate) transitions: Registry<S, Transition<S, E>>,
    pub(crate) on_enter: Registry<S, Callback<S>>,
    pub(crate) on_exit: Registry<S, Callback<S>>,
    pub(crate) on_transition: Vec<TransitionHook<S, E>>,
}

impl<S: State, E: Event> Tables<S, E> {
    pub(crate) fn add_transition(&mut self, from: S, event: E, to: S, guard: Option<Guard<S>>) {
        self.transitions.push(from, Transition { event, to, guard });
    }

    pub(crate) fn add_entry_callback(&mut self, state: S, callback: Callback<S>) {
        self.on_enter.push(state, callback);
    }

    pub(crate) fn add_exit_callback(&mut self, state: S, callback: Callback<S>) {
        self.on_exit.push(state, callback);
    }

    pub(crate) fn add_transition_hook(&mut self, hook: TransitionHook<S, E>) {
        self.on_transition.push(hook);
    }
}

impl<S: State, E: Event> Default for Tables<S, E> {
    fn default() -> Self {
        Self {
            transitions: Registry::new(),
            on_enter: Registry::new(),
            on_exit: Registry::new(),
            on_transition: Vec::new(),
        }
    }
}

/// Transition table and lifecycle callbacks for one machine definition.
///
/// # Example
///
/// ```rust
/// use statekit::config::Configuration;
/// use statekit::core::Guard;
///
/// let mut config: Configuration<&str, &str> = Configuration::new("idle");
/// config
///     .add_transition("idle", "start", "running", None)
///     .add_transition(
///         "running",
///         "stop",
///         "stopped",
///         Some(Guard::new(|ctx| ctx.data().contains_key("drained"))),
///     )
///     .add_entry_callback("running", |_ctx| Ok(()));
///
/// assert_eq!(config.states(), vec!["idle", "running", "stopped"]);
/// assert!(config.has_entry_callbacks(&"running"));
/// ```
pub struct Configuration<S: State, E: Event> {
    initial: S,
    tables: Tables<S, E>,
}

impl<S: State, E: Event> Configuration<S, E> {
    /// Create an empty configuration whose machines start at `initial`.
    pub fn new(initial: S) -> Self {
        Self::from_tables(initial, Tables::default())
    }

    pub(crate) fn from_tables(initial: S, tables: Tables<S, E>) -> Self {
        Self { initial, tables }
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Append a transition to `from`'s list. `None` means always eligible.
    pub fn add_transition(
        &mut self,
        from: S,
        event: E,
        to: S,
        guard: Option<Guard<S>>,
    ) -> &mut Self {
        self.tables.add_transition(from, event, to, guard);
        self
    }

    /// Append an entry callback for `state`.
    pub fn add_entry_callback<F>(&mut self, state: S, callback: F) -> &mut Self
    where
        F: Fn(&mut Context<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.tables.add_entry_callback(state, Box::new(callback));
        self
    }

    /// Append an exit callback for `state`.
    pub fn add_exit_callback<F>(&mut self, state: S, callback: F) -> &mut Self
    where
        F: Fn(&mut Context<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.tables.add_exit_callback(state, Box::new(callback));
        self
    }

    /// Append a global transition hook.
    pub fn add_transition_hook<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&S, &S, &E, &mut Context<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.tables.add_transition_hook(Box::new(hook));
        self
    }

    /// Every state the table mentions: the initial state, then each
    /// transition source and target in first-seen order, without repeats.
    pub fn states(&self) -> Vec<S> {
        let mut states = vec![self.initial.clone()];
        let mut insert = |state: &S| {
            if !states.contains(state) {
                states.push(state.clone());
            }
        };

        for (from, transitions) in self.tables.transitions.iter() {
            insert(from);
            for transition in transitions {
                insert(&transition.to);
            }
        }

        states
    }

    /// Whether `state` belongs to [`states`](Self::states), without allocating.
    pub fn contains_state(&self, state: &S) -> bool {
        *state == self.initial
            || self
                .tables
                .transitions
                .iter()
                .any(|(from, transitions)| from == state || transitions.iter().any(|t| t.to == *state))
    }

    /// Transitions configured out of `state`, in insertion order.
    pub fn transitions_from(&self, state: &S) -> &[Transition<S, E>] {
        self.tables.transitions.get(state)
    }

    /// Every configured transition, grouped by source in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = TransitionInfo<'_, S, E>> {
        self.tables
            .transitions
            .iter()
            .flat_map(|(from, transitions)| {
                transitions.iter().map(move |t| TransitionInfo {
                    from,
                    event: &t.event,
                    to: &t.to,
                    guarded: t.is_guarded(),
                })
            })
    }

    /// Whether `state` has any outgoing transition.
    pub fn has_outgoing(&self, state: &S) -> bool {
        !self.tables.transitions.get(state).is_empty()
    }

    pub fn has_entry_callbacks(&self, state: &S) -> bool {
        self.tables.on_enter.contains_key(state)
    }

    pub fn has_exit_callbacks(&self, state: &S) -> bool {
        self.tables.on_exit.contains_key(state)
    }

    pub(crate) fn entry_callbacks(&self, state: &S) -> &[Callback<S>] {
        self.tables.on_enter.get(state)
    }

    pub(crate) fn exit_callbacks(&self, state: &S) -> &[Callback<S>] {
        self.tables.on_exit.get(state)
    }

    pub(crate) fn transition_hooks(&self) -> &[TransitionHook<S, E>] {
        &self.tables.on_transition
    }

    pub(crate) fn tables(&self) -> &Tables<S, E> {
        &self.tables
    }
}

impl<S: State, E: Event> fmt::Debug for Configuration<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("initial", &self.initial)
            .field("transitions", &self.transitions().count())
            .field("hooks", &self.tables.on_transition.len())
            .finish_non_exhaustive()
    }
}
