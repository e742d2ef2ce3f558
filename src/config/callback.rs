//! Caller-supplied callback and hook signatures.

use crate::core::Context;

/// Failure returned by a callback or hook.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a callback or hook.
pub type CallbackResult = Result<(), BoxError>;

/// Entry or exit callback.
pub type Callback<S> = Box<dyn Fn(&mut Context<S>) -> CallbackResult + Send + Sync>;

/// Global hook run on every transition with `(from, to, event, context)`.
///
/// Hooks run after the source's exit callbacks and before the target's
/// entry callbacks.
pub type TransitionHook<S, E> =
    Box<dyn Fn(&S, &S, &E, &mut Context<S>) -> CallbackResult + Send + Sync>;
