//! Thread-safe façade over a [`StateMachine`].
//!
//! Read-only operations take a shared lock and may run concurrently with
//! each other. Mutating operations take the exclusive lock, so no two of
//! them overlap and none overlaps a read.

use crate::checkpoint::{Checkpoint, CheckpointError, Snapshot};
use crate::core::{Context, Event, State};
use crate::engine::{CallbackError, StateMachine, TransitionError};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;

/// A [`StateMachine`] guarded by a single reader/writer lock.
///
/// Share it with `Arc<SyncStateMachine<_, _>>`. Callbacks run while the
/// exclusive lock is held, so a callback must never call back into the same
/// façade; hand the event to another thread or task instead.
///
/// # Example
///
/// ```rust
/// use statekit::{StateMachine, StateMachineBuilder};
/// use std::sync::Arc;
/// use std::thread;
///
/// let machine: StateMachine<&str, &str> = StateMachineBuilder::new()
///     .initial("off")
///     .transition("off", "toggle", "on")
///     .transition("on", "toggle", "off")
///     .build()
///     .unwrap();
/// let shared = Arc::new(machine.into_sync());
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || shared.trigger("toggle").unwrap())
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(shared.current(), "off");
/// assert_eq!(shared.history().len(), 5);
/// ```
pub struct SyncStateMachine<S: State, E: Event> {
    inner: RwLock<StateMachine<S, E>>,
}

impl<S: State, E: Event> SyncStateMachine<S, E> {
    pub fn new(machine: StateMachine<S, E>) -> Self {
        Self {
            inner: RwLock::new(machine),
        }
    }

    /// Unwrap the machine, giving up the lock.
    pub fn into_inner(self) -> StateMachine<S, E> {
        self.inner.into_inner()
    }

    pub fn trigger(&self, event: E) -> Result<(), TransitionError<S, E>> {
        self.inner.write().trigger(event)
    }

    pub fn trigger_with<I>(&self, event: E, input: I) -> Result<(), TransitionError<S, E>>
    where
        I: Any + Send + Sync,
    {
        self.inner.write().trigger_with(event, input)
    }

    pub fn current(&self) -> S {
        self.inner.read().current().clone()
    }

    /// Read the context under the shared lock.
    pub fn with_context<R>(&self, f: impl FnOnce(&Context<S>) -> R) -> R {
        f(self.inner.read().context())
    }

    /// Mutate the context under the exclusive lock.
    pub fn with_context_mut<R>(&self, f: impl FnOnce(&mut Context<S>) -> R) -> R {
        f(self.inner.write().context_mut())
    }

    pub fn history(&self) -> Vec<S> {
        self.inner.read().history()
    }

    pub fn states(&self) -> Vec<S> {
        self.inner.read().states()
    }

    /// See [`StateMachine::set_state`].
    pub fn set_state(&self, state: S) {
        self.inner.write().set_state(state);
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    pub fn call_entry(&self, state: S) -> Result<(), CallbackError<S>> {
        self.inner.write().call_entry(state)
    }

    pub fn snapshot(&self) -> Snapshot<S> {
        self.inner.read().snapshot()
    }

    pub fn checkpoint(&self) -> Checkpoint<S> {
        self.inner.read().checkpoint()
    }

    pub fn restore(&self, snapshot: Snapshot<S>) -> Result<(), CheckpointError<S>> {
        self.inner.write().restore(snapshot)
    }

    pub fn resume(&self, checkpoint: Checkpoint<S>) -> Result<(), CheckpointError<S>> {
        self.inner.write().resume(checkpoint)
    }

    pub fn to_dot(&self) -> String {
        self.inner.read().to_dot()
    }
}

impl<S: State + Serialize, E: Event> SyncStateMachine<S, E> {
    pub fn to_json(&self) -> Result<String, CheckpointError<S>> {
        self.inner.read().to_json()
    }
}

impl<S: State + DeserializeOwned, E: Event> SyncStateMachine<S, E> {
    /// Decode and restore. Parsing happens before the exclusive lock is
    /// taken, so a malformed payload never blocks readers.
    pub fn restore_json(&self, json: &str) -> Result<(), CheckpointError<S>> {
        let snapshot: Snapshot<S> = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        self.restore(snapshot)
    }
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Wrap this machine in the thread-safe façade.
    pub fn into_sync(self) -> SyncStateMachine<S, E> {
        SyncStateMachine::new(self)
    }
}

impl<S: State, E: Event> From<StateMachine<S, E>> for SyncStateMachine<S, E> {
    fn from(machine: StateMachine<S, E>) -> Self {
        Self::new(machine)
    }
}
