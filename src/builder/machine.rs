//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::config::{CallbackResult, Configuration, Tables};
use crate::core::{Context, Event, Guard, State};
use crate::engine::StateMachine;
use stillwater::validation::Validation;

/// Builder for constructing state machines with a fluent API.
///
/// Callbacks and hooks run in the order they are registered here.
pub struct StateMachineBuilder<S: State, E: Event> {
    initial: Option<S>,
    tables: Tables<S, E>,
}

impl<S: State, E: Event> StateMachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            tables: Tables::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add an unguarded transition.
    pub fn transition(mut self, from: S, event: E, to: S) -> Self {
        self.tables.add_transition(from, event, to, None);
        self
    }

    /// Add a transition that is only eligible while `guard` returns true.
    pub fn transition_when<F>(mut self, from: S, event: E, to: S, guard: F) -> Self
    where
        F: Fn(&Context<S>) -> bool + Send + Sync + 'static,
    {
        self.tables
            .add_transition(from, event, to, Some(Guard::new(guard)));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn with_transition(mut self, builder: TransitionBuilder<S, E>) -> Result<Self, BuildError> {
        let spec = builder.build()?;
        self.tables
            .add_transition(spec.from, spec.event, spec.to, spec.guard);
        Ok(self)
    }

    /// Register a callback run when entering `state`.
    pub fn on_enter<F>(mut self, state: S, callback: F) -> Self
    where
        F: Fn(&mut Context<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.tables.add_entry_callback(state, Box::new(callback));
        self
    }

    /// Register a callback run when leaving `state`.
    pub fn on_exit<F>(mut self, state: S, callback: F) -> Self
    where
        F: Fn(&mut Context<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.tables.add_exit_callback(state, Box::new(callback));
        self
    }

    /// Register a hook run on every transition, between exit and entry
    /// callbacks.
    pub fn on_transition<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &S, &E, &mut Context<S>) -> CallbackResult + Send + Sync + 'static,
    {
        self.tables.add_transition_hook(Box::new(hook));
        self
    }

    /// Finish the configuration without creating a machine, e.g. to share
    /// it between several instances.
    pub fn configuration(self) -> Result<Configuration<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        Ok(Configuration::from_tables(initial, self.tables))
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<S, E>, BuildError> {
        Ok(StateMachine::new(self.configuration()?))
    }

    /// Build the state machine, rejecting configurations that
    /// [`Configuration::validate`] flags.
    pub fn build_validated(self) -> Result<StateMachine<S, E>, BuildError> {
        let config = self.configuration()?;

        match config.validate() {
            Validation::Success(_) => Ok(StateMachine::new(config)),
            Validation::Failure(issues) => Err(BuildError::InvalidConfiguration(
                issues.iter().map(ToString::to_string).collect(),
            )),
        }
    }
}

impl<S: State, E: Event> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
