//! Errors surfaced by `trigger` and the other engine operations.

use crate::config::BoxError;
use crate::core::{Event, State};
use std::fmt;
use thiserror::Error;

/// Where a caller-supplied function failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A transition guard panicked while deciding eligibility.
    Guard,
    OnExit,
    OnEnter,
    OnTransitionHook,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Guard => "Guard",
            Self::OnExit => "OnExit",
            Self::OnEnter => "OnEnter",
            Self::OnTransitionHook => "OnTransition",
        })
    }
}

/// A callback, hook or guard returned a failure or panicked.
///
/// `state` is the state the callback was registered for; it is `None` for
/// global transition hooks. `cause` is the returned error, or a
/// [`Panicked`] describing the caught panic.
#[derive(Debug)]
pub struct CallbackError<S: State> {
    pub phase: Phase,
    pub state: Option<S>,
    pub cause: BoxError,
}

impl<S: State> CallbackError<S> {
    pub fn new(phase: Phase, state: Option<S>, cause: BoxError) -> Self {
        Self {
            phase,
            state,
            cause,
        }
    }

    /// Whether the failure was a caught panic rather than a returned error.
    pub fn is_panic(&self) -> bool {
        self.cause.is::<Panicked>()
    }
}

impl<S: State> fmt::Display for CallbackError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Some(state) => write!(
                f,
                "error in {} callback for state {:?}: {}",
                self.phase, state, self.cause
            ),
            None => write!(f, "error in {} hook: {}", self.phase, self.cause),
        }
    }
}

impl<S: State> std::error::Error for CallbackError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// A panic caught while running caller-supplied code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("panic: {message}")]
pub struct Panicked {
    pub message: String,
}

impl Panicked {
    pub(crate) fn from_payload(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Errors that can occur during a trigger.
#[derive(Debug, Error)]
pub enum TransitionError<S: State, E: Event> {
    #[error("no matching transition for event {event:?} from state {from:?}")]
    InvalidTransition { from: S, event: E },

    #[error(
        "ambiguous transition from state {from:?} on event {event:?}; multiple guards returned true"
    )]
    AmbiguousTransition { from: S, event: E },

    #[error("{0}")]
    Callback(#[from] CallbackError<S>),
}

impl<S: State, E: Event> TransitionError<S, E> {
    /// The callback failure, if this error came from one.
    pub fn as_callback(&self) -> Option<&CallbackError<S>> {
        match self {
            Self::Callback(err) => Some(err),
            _ => None,
        }
    }
}
