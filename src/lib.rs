//! Statekit: a table-driven finite state machine engine
//!
//! A machine is described by a configuration: a transition table keyed by
//! source state, optional guards, entry/exit callbacks per state and global
//! transition hooks. Machines are driven by feeding them events.
//!
//! # Core Concepts
//!
//! - **Configuration**: Built once, then shared read-only between instances
//! - **Context**: Per-instance data bag seen by guards and callbacks
//! - **Engine**: Runs a trigger synchronously; commits only after every
//!   callback succeeded
//! - **Façade**: `SyncStateMachine` serializes access from many threads
//! - **Snapshot**: Serializable runtime state, restored all-or-nothing
//!
//! # Example
//!
//! ```rust
//! use statekit::{StateMachine, StateMachineBuilder};
//!
//! let mut machine: StateMachine<String, &str> = StateMachineBuilder::new()
//!     .initial("idle".to_string())
//!     .transition("idle".to_string(), "start", "running".to_string())
//!     .transition("running".to_string(), "stop", "idle".to_string())
//!     .on_enter("running".to_string(), |ctx| {
//!         ctx.meta_mut().set("started", true);
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! machine.trigger("start").unwrap();
//! assert_eq!(machine.current(), "running");
//!
//! let json = machine.to_json().unwrap();
//! let mut restored = machine.new_instance();
//! restored.restore_json(&json).unwrap();
//! assert_eq!(restored.history(), machine.history());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;
pub mod sync;
pub mod visualize;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError, Snapshot};
pub use config::{ConfigIssue, Configuration};
pub use crate::core::{Context, Event, Guard, State, Store};
pub use engine::{CallbackError, Phase, StateMachine, TransitionError};
pub use sync::SyncStateMachine;
