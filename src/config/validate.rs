//! Static configuration checks using Validation.
//!
//! Problems are accumulated rather than reported one at a time, so a single
//! call lists everything wrong with a table.

use super::Configuration;
use crate::core::{Event, State};
use crate::engine::Phase;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A configuration problem detectable without running the machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigIssue<S: State, E: Event> {
    /// Unguarded duplicates always match together, so the event can never
    /// fire from this state.
    #[error("state {from:?} has {count} unguarded transitions on event {event:?}")]
    DuplicateUnguarded { from: S, event: E, count: usize },

    #[error("{phase} callbacks registered for state {state:?}, which no transition mentions")]
    OrphanCallbacks { state: S, phase: Phase },
}

impl<S: State, E: Event> Configuration<S, E> {
    /// Check the table for problems, accumulating ALL of them.
    ///
    /// Returns `Validation::Success(())` for a clean table.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigIssue<S, E>>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigIssue<S, E>>>> = Vec::new();
        let tables = self.tables();

        for (from, transitions) in tables.transitions.iter() {
            let mut seen: Vec<&E> = Vec::new();
            for transition in transitions.iter().filter(|t| !t.is_guarded()) {
                if seen.contains(&&transition.event) {
                    continue;
                }
                seen.push(&transition.event);

                let count = transitions
                    .iter()
                    .filter(|t| !t.is_guarded() && t.event == transition.event)
                    .count();
                let check = if count > 1 {
                    Validation::fail(ConfigIssue::DuplicateUnguarded {
                        from: from.clone(),
                        event: transition.event.clone(),
                        count,
                    })
                } else {
                    Validation::success(())
                };
                checks.push(check);
            }
        }

        let registries = [
            (&tables.on_enter, Phase::OnEnter),
            (&tables.on_exit, Phase::OnExit),
        ];
        for (registry, phase) in registries {
            for (state, _) in registry.iter() {
                let check = if self.contains_state(state) {
                    Validation::success(())
                } else {
                    Validation::fail(ConfigIssue::OrphanCallbacks {
                        state: state.clone(),
                        phase,
                    })
                };
                checks.push(check);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
