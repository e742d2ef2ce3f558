//! Snapshot and restore of a machine's runtime state.
//!
//! A [`Snapshot`] carries `current`, `history`, and the persistent `data`
//! and `meta` stores. Configuration (transitions, callbacks) is NOT part of
//! it: the restoring side must build an identical configuration first.
//!
//! Restores are all-or-nothing. The payload is parsed and validated
//! completely before the target machine is touched.

use crate::config::Configuration;
use crate::core::{Context, Event, History, State, Store};
use crate::engine::StateMachine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable runtime state of one machine.
///
/// All four fields are required when decoding; unknown extra fields are
/// ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    /// State the machine is in
    pub current: S,

    /// Entered states, oldest first; may contain repeats
    pub history: Vec<S>,

    /// Context data store
    pub data: Store,

    /// Context meta store
    pub meta: Store,
}

impl<S: State> Snapshot<S> {
    /// Check the snapshot against a configuration.
    ///
    /// Membership is checked first (`current`, then each history entry in
    /// order), then shape: history must be non-empty and begin at the
    /// initial state.
    pub fn validate<E: Event>(&self, config: &Configuration<S, E>) -> Result<(), CheckpointError<S>> {
        if !config.contains_state(&self.current) {
            return Err(CheckpointError::UnknownState {
                state: self.current.clone(),
            });
        }

        if let Some(unknown) = self.history.iter().find(|s| !config.contains_state(s)) {
            return Err(CheckpointError::UnknownState {
                state: unknown.clone(),
            });
        }

        match self.history.first() {
            None => Err(CheckpointError::ValidationFailed(
                "history is empty".to_string(),
            )),
            Some(first) if first != config.initial() => {
                Err(CheckpointError::ValidationFailed(format!(
                    "history starts at {:?}, expected initial state {:?}",
                    first,
                    config.initial()
                )))
            }
            Some(_) => Ok(()),
        }
    }
}

/// Versioned envelope around a [`Snapshot`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint<S> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine that produced it
    pub initial_state: S,

    /// Runtime state at checkpoint time
    pub snapshot: Snapshot<S>,
}

impl<S: State + Serialize> Checkpoint<S> {
    pub fn to_json(&self) -> Result<String, CheckpointError<S>> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }
}

impl<S: State + DeserializeOwned> Checkpoint<S> {
    pub fn from_json(json: &str) -> Result<Self, CheckpointError<S>> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Capture `current`, history and the persistent stores.
    pub fn snapshot(&self) -> Snapshot<S> {
        Snapshot {
            current: self.current().clone(),
            history: self.history(),
            data: self.context().data().clone(),
            meta: self.context().meta().clone(),
        }
    }

    /// Restore runtime state from a snapshot taken under the same
    /// configuration.
    ///
    /// On success the context is replaced: it points at `current`, holds
    /// the snapshot's stores, and has no input. On error nothing changes.
    pub fn restore(&mut self, snapshot: Snapshot<S>) -> Result<(), CheckpointError<S>> {
        snapshot.validate(self.configuration())?;

        let Snapshot {
            current,
            history,
            data,
            meta,
        } = snapshot;

        debug!(
            current = current.name(),
            history_len = history.len(),
            "restoring snapshot"
        );
        let context = Context::with_stores(current.clone(), data, meta);
        self.install(current, History::from_states(history), context);
        Ok(())
    }

    /// Wrap a snapshot in a versioned checkpoint.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.initial().clone(),
            snapshot: self.snapshot(),
        }
    }

    /// Restore from a checkpoint produced by a compatible machine.
    pub fn resume(&mut self, checkpoint: Checkpoint<S>) -> Result<(), CheckpointError<S>> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if checkpoint.initial_state != *self.initial() {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint initial state {:?} does not match {:?}",
                checkpoint.initial_state,
                self.initial()
            )));
        }

        debug!(id = %checkpoint.id, "resuming from checkpoint");
        self.restore(checkpoint.snapshot)
    }
}

impl<S: State + Serialize, E: Event> StateMachine<S, E> {
    /// Encode the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError<S>> {
        serde_json::to_string(&self.snapshot())
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }
}

impl<S: State + DeserializeOwned, E: Event> StateMachine<S, E> {
    /// Decode a JSON snapshot and restore it.
    pub fn restore_json(&mut self, json: &str) -> Result<(), CheckpointError<S>> {
        let snapshot: Snapshot<S> = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        self.restore(snapshot)
    }
}
