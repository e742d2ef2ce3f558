//! State machine that executes configured transitions.

use super::error::{CallbackError, Phase, TransitionError};
use super::invoke::contain;
use crate::config::Configuration;
use crate::core::{Context, Event, History, Input, State};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

/// One running instance of a configured machine.
///
/// The configuration is shared by reference; `current`, `history` and the
/// [`Context`] belong to this instance alone. Mutating operations must not
/// run concurrently; wrap the machine with [`into_sync`](Self::into_sync)
/// to drive it from several threads.
///
/// # Example
///
/// ```rust
/// use statekit::{StateMachine, StateMachineBuilder, TransitionError};
///
/// let mut machine: StateMachine<&str, &str> = StateMachineBuilder::new()
///     .initial("idle")
///     .transition("idle", "start", "running")
///     .transition("running", "pause", "paused")
///     .build()
///     .unwrap();
///
/// machine.trigger("start").unwrap();
/// assert_eq!(machine.current(), &"running");
/// assert_eq!(machine.history(), vec!["idle", "running"]);
///
/// let err = machine.trigger("bogus").unwrap_err();
/// assert!(matches!(err, TransitionError::InvalidTransition { .. }));
/// assert_eq!(machine.current(), &"running");
/// ```
pub struct StateMachine<S: State, E: Event> {
    config: Arc<Configuration<S, E>>,
    current: S,
    history: History<S>,
    context: Context<S>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Create a machine in the configuration's initial state.
    pub fn new(config: Configuration<S, E>) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Create a machine over a configuration shared with other instances.
    pub fn from_shared(config: Arc<Configuration<S, E>>) -> Self {
        let initial = config.initial().clone();
        Self::with_context(config, Context::new(initial))
    }

    /// Create a machine with a caller-supplied initial context.
    ///
    /// The context's state is moved to the initial state. If the caller
    /// keeps other handles to values inside it, synchronizing those is the
    /// caller's job.
    pub fn with_context(config: Arc<Configuration<S, E>>, mut context: Context<S>) -> Self {
        let initial = config.initial().clone();
        context.set_state(initial.clone());
        Self {
            current: initial.clone(),
            history: History::new(initial),
            context,
            config,
        }
    }

    /// A fresh instance sharing this machine's configuration.
    ///
    /// The new instance starts in the initial state with an empty context
    /// and a one-entry history; nothing from this instance is copied.
    pub fn new_instance(&self) -> Self {
        Self::from_shared(Arc::clone(&self.config))
    }

    pub fn configuration(&self) -> &Arc<Configuration<S, E>> {
        &self.config
    }

    pub fn initial(&self) -> &S {
        self.config.initial()
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    pub fn context(&self) -> &Context<S> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context<S> {
        &mut self.context
    }

    /// Copy of the entered-state history.
    pub fn history(&self) -> Vec<S> {
        self.history.to_vec()
    }

    /// Borrow the live history.
    pub fn history_ref(&self) -> &History<S> {
        &self.history
    }

    pub fn states(&self) -> Vec<S> {
        self.config.states()
    }

    /// Fire `event` with no input.
    ///
    /// Runs to completion on the calling thread. On success the machine
    /// has entered the target state and recorded it in history. On failure
    /// `current` and `history` are unchanged, but the cleared input and
    /// any side effects of callbacks that already ran are not undone.
    ///
    /// Callbacks must not call back into a [`SyncStateMachine`] wrapping
    /// this machine; the lock is held for the whole trigger.
    ///
    /// [`SyncStateMachine`]: crate::sync::SyncStateMachine
    pub fn trigger(&mut self, event: E) -> Result<(), TransitionError<S, E>> {
        self.fire(event, None)
    }

    /// Fire `event`, exposing `input` to guards and callbacks through
    /// [`Context::input`] for this trigger only.
    pub fn trigger_with<I>(&mut self, event: E, input: I) -> Result<(), TransitionError<S, E>>
    where
        I: Any + Send + Sync,
    {
        self.fire(event, Some(Box::new(input)))
    }

    fn fire(&mut self, event: E, input: Option<Input>) -> Result<(), TransitionError<S, E>> {
        self.context.replace_input(input);

        let next = self.select(&event)?;
        let previous = self.current.clone();

        if let Err(err) = self.run_phases(&previous, &next, &event) {
            self.context.set_state(self.current.clone());
            return Err(err.into());
        }

        self.current = next.clone();
        self.history.record(next);
        debug!(
            from = previous.name(),
            to = self.current.name(),
            event = event.name(),
            "transition committed"
        );
        Ok(())
    }

    /// Pick the single eligible transition for `event`.
    ///
    /// Every guard listening for the event is evaluated before counting,
    /// so the outcome never depends on where the matches sit in the list.
    fn select(&self, event: &E) -> Result<S, TransitionError<S, E>> {
        let mut matched: Vec<&S> = Vec::new();

        for transition in self
            .config
            .transitions_from(&self.current)
            .iter()
            .filter(|t| t.accepts(event))
        {
            let eligible = match transition.guard() {
                None => true,
                Some(guard) => contain(Phase::Guard, Some(&self.current), || {
                    Ok(guard.check(&self.context))
                })?,
            };
            if eligible {
                matched.push(transition.target());
            }
        }

        match matched.as_slice() {
            [] => Err(TransitionError::InvalidTransition {
                from: self.current.clone(),
                event: event.clone(),
            }),
            [target] => Ok((*target).clone()),
            _ => Err(TransitionError::AmbiguousTransition {
                from: self.current.clone(),
                event: event.clone(),
            }),
        }
    }

    /// Exit callbacks, then hooks, then entry callbacks. Nothing here
    /// touches `current` or `history`.
    fn run_phases(&mut self, previous: &S, next: &S, event: &E) -> Result<(), CallbackError<S>> {
        self.context.set_state(previous.clone());
        for callback in self.config.exit_callbacks(previous) {
            contain(Phase::OnExit, Some(previous), || callback(&mut self.context))?;
        }

        // Hooks already see the target state even though nothing is committed.
        self.context.set_state(next.clone());
        for hook in self.config.transition_hooks() {
            contain(Phase::OnTransitionHook, None, || {
                hook(previous, next, event, &mut self.context)
            })?;
        }

        for callback in self.config.entry_callbacks(next) {
            contain(Phase::OnEnter, Some(next), || callback(&mut self.context))?;
        }

        Ok(())
    }

    /// Run `state`'s entry callbacks without a transition.
    ///
    /// Used to bootstrap the first state or re-run entry logic. The context
    /// is pointed at `state`; `current` and `history` are untouched.
    pub fn call_entry(&mut self, state: S) -> Result<(), CallbackError<S>> {
        trace!(state = state.name(), "running entry callbacks");
        self.context.set_state(state.clone());
        for callback in self.config.entry_callbacks(&state) {
            contain(Phase::OnEnter, Some(&state), || callback(&mut self.context))?;
        }
        Ok(())
    }

    /// Force the machine into `state`.
    ///
    /// Bypasses guards, hooks, callbacks and transition validation, and does
    /// not record history. Meant for restoration and administrative
    /// override only; use [`trigger`](Self::trigger) for normal operation.
    pub fn set_state(&mut self, state: S) {
        debug!(from = self.current.name(), to = state.name(), "state overridden");
        self.context.set_state(state.clone());
        self.current = state;
    }

    /// Return to the initial state with a fresh context and history.
    pub fn reset(&mut self) {
        let initial = self.config.initial().clone();
        debug!(initial = initial.name(), "machine reset");
        self.context = Context::new(initial.clone());
        self.history = History::new(initial.clone());
        self.current = initial;
    }

    /// Replace runtime state wholesale. Callers validate beforehand.
    pub(crate) fn install(&mut self, current: S, history: History<S>, context: Context<S>) {
        self.current = current;
        self.history = history;
        self.context = context;
    }
}

impl<S: State, E: Event> std::fmt::Debug for StateMachine<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("history", &self.history)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
