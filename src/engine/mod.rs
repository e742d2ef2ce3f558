//! Transition execution engine.
//!
//! A trigger runs in a fixed order, all on the caller's thread:
//!
//! 1. Replace the context input (never rolled back)
//! 2. Select exactly one guard-passing transition for the event
//! 3. Run the source state's exit callbacks
//! 4. Run every global transition hook (context already names the target)
//! 5. Run the target state's entry callbacks
//! 6. Commit: update `current` and append to history
//!
//! Any failure before step 6 leaves `current` and history untouched.
//! Every guard, callback and hook runs inside its own fault boundary, so a
//! panic becomes a [`CallbackError`] instead of unwinding into the caller.

mod error;
mod invoke;
mod machine;

pub use error::{CallbackError, Panicked, Phase, TransitionError};
pub use machine::StateMachine;
