//! Label traits for states and events.
//!
//! States and events are opaque, comparable labels. The engine never
//! inspects them beyond equality and the `name()` used for diagnostics.

use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history and snapshots
/// - `PartialEq`: Transition lookup compares states
/// - `Debug`: Errors render states with `{:?}`
/// - `Send + Sync + 'static`: Machines may be shared across threads
///
/// Serialization is only required by the snapshot codec, so it is not
/// part of this trait.
///
/// # Example
///
/// ```rust
/// use statekit::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// assert_eq!("idle".name(), "idle");
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Trait for events that drive transitions.
///
/// Kept separate from [`State`] so the two label spaces cannot be mixed up
/// at a call site.
pub trait Event: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Event for &'static str {
    fn name(&self) -> &str {
        self
    }
}
