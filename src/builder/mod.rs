//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for assembling a
//! configuration and the machine that runs it.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::{TransitionBuilder, TransitionSpec};
