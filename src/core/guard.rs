//! Guard predicates for controlling state transitions.
//!
//! Guards decide whether a configured transition is eligible for the
//! event being processed. They see the full [`Context`], including the
//! ephemeral trigger input.

use super::context::Context;
use super::state::State;

/// Predicate over the context that determines if a transition can execute.
///
/// Guards are expected to be side-effect free; the engine does not enforce
/// this. A guard that panics is contained by the engine and reported as a
/// callback failure.
///
/// # Example
///
/// ```rust
/// use statekit::core::{Context, Guard};
///
/// let has_budget = Guard::new(|ctx: &Context<&'static str>| {
///     ctx.data().get_as::<u32>("budget").unwrap_or(0) > 0
/// });
///
/// let mut ctx = Context::new("idle");
/// assert!(!has_budget.check(&ctx));
///
/// ctx.data_mut().set("budget", 5);
/// assert!(has_budget.check(&ctx));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&Context<S>) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a predicate function.
    ///
    /// The predicate must be thread-safe (Send + Sync) because a
    /// configuration may be shared by several machines.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context<S>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against the context.
    pub fn check(&self, ctx: &Context<S>) -> bool {
        (self.predicate)(ctx)
    }
}

impl<S: State> std::fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_reads_context_data() {
        let guard = Guard::new(|ctx: &Context<&'static str>| ctx.data().contains_key("ready"));
        let mut ctx = Context::new("idle");

        assert!(!guard.check(&ctx));
        ctx.data_mut().set("ready", true);
        assert!(guard.check(&ctx));
    }

    #[test]
    fn guard_reads_trigger_input() {
        let guard = Guard::new(|ctx: &Context<&'static str>| ctx.input::<u32>() == Some(&7));
        let mut ctx = Context::new("idle");

        ctx.replace_input(Some(Box::new(7u32)));
        assert!(guard.check(&ctx));

        ctx.replace_input(Some(Box::new(8u32)));
        assert!(!guard.check(&ctx));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|ctx: &Context<&'static str>| *ctx.state() == "idle");
        let ctx = Context::new("idle");

        assert_eq!(guard.check(&ctx), guard.check(&ctx));
    }
}
