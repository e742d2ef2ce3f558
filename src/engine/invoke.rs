//! Fault containment around each caller-supplied call.

use super::error::{CallbackError, Phase, Panicked};
use crate::config::BoxError;
use crate::core::State;
use std::panic::{self, AssertUnwindSafe};

/// Run one guard, callback or hook, turning a returned error or a panic
/// into a [`CallbackError`] attributed to `phase` and `state`.
///
/// Each external call gets its own scope so a failure names exactly the
/// phase that produced it, and no panic unwinds through the engine.
pub(crate) fn contain<S, T, F>(phase: Phase, state: Option<&S>, call: F) -> Result<T, CallbackError<S>>
where
    S: State,
    F: FnOnce() -> Result<T, BoxError>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(cause)) => Err(CallbackError::new(phase, state.cloned(), cause)),
        Err(payload) => Err(CallbackError::new(
            phase,
            state.cloned(),
            Box::new(Panicked::from_payload(payload)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_success() {
        let result = contain(Phase::OnEnter, Some(&"a"), || Ok::<_, BoxError>(5));

        assert_eq!(result.unwrap(), 5);
    }

    #[test]
    fn wraps_returned_errors() {
        let err = contain::<&str, (), _>(Phase::OnExit, Some(&"a"), || Err("failed".into()))
            .unwrap_err();

        assert_eq!(err.phase, Phase::OnExit);
        assert_eq!(err.state, Some("a"));
        assert!(!err.is_panic());
    }

    #[test]
    fn catches_panics() {
        let err = contain::<&str, (), _>(Phase::OnTransitionHook, None, || panic!("kaboom"))
            .unwrap_err();

        assert!(err.is_panic());
        assert_eq!(err.state, None);
        assert_eq!(err.cause.to_string(), "panic: kaboom");
    }
}
