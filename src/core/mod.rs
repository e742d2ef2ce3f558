//! Core state machine types.
//!
//! This module contains the building blocks shared by every other layer:
//! - State and event labels via the `State` and `Event` traits
//! - The shared `Context` with its persistent `Store`s
//! - Guard predicates for transition control
//! - Ordered history of entered states

mod context;
mod guard;
mod history;
mod state;

pub use context::{Context, Input, Store};
pub use guard::Guard;
pub use history::History;
pub use state::{Event, State};
