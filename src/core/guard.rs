//! Guard predicates for entering a step.
//!
//! A guard is attached to a step descriptor and is evaluated right before the
//! tour lands on that step. Returning `false` vetoes the whole transition.

use super::status::Direction;
use std::fmt;
use std::sync::Arc;

/// What a guard sees when a transition wants to enter its step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardContext<'a> {
    /// Name of the tour being navigated
    pub tour: &'a str,
    /// Index the tour is leaving (`None` when starting)
    pub from: Option<usize>,
    /// Index of the step being entered
    pub to: usize,
    /// Which operation triggered the move
    pub direction: Direction,
}

/// Predicate that decides whether a step may be entered.
///
/// # Example
///
/// ```rust
/// use tourguide::core::{Direction, GuardContext, StepGuard};
///
/// // Never enter this step by walking backwards
/// let forward_only = StepGuard::new(|ctx: &GuardContext<'_>| ctx.direction != Direction::Previous);
///
/// let ctx = GuardContext { tour: "intro", from: Some(2), to: 1, direction: Direction::Previous };
/// assert!(!forward_only.check(&ctx));
/// ```
#[derive(Clone)]
pub struct StepGuard {
    predicate: Arc<dyn Fn(&GuardContext<'_>) -> bool + Send + Sync>,
}

impl StepGuard {
    /// Create a guard from a predicate function.
    ///
    /// The predicate should be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&GuardContext<'_>) -> bool + Send + Sync + 'static,
    {
        StepGuard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows entering the step.
    pub fn check(&self, ctx: &GuardContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for StepGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StepGuard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(from: Option<usize>, to: usize, direction: Direction) -> GuardContext<'static> {
        GuardContext {
            tour: "test",
            from,
            to,
            direction,
        }
    }

    #[test]
    fn guard_allows_matching_contexts() {
        let guard = StepGuard::new(|c: &GuardContext<'_>| c.direction == Direction::Start);

        assert!(guard.check(&ctx(None, 0, Direction::Start)));
        assert!(!guard.check(&ctx(Some(0), 1, Direction::Next)));
    }

    #[test]
    fn guard_sees_tour_name_and_indices() {
        let guard =
            StepGuard::new(|c: &GuardContext<'_>| c.tour == "test" && c.from == Some(1) && c.to == 2);

        assert!(guard.check(&ctx(Some(1), 2, Direction::Next)));
        assert!(!guard.check(&ctx(Some(0), 2, Direction::Jump)));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = StepGuard::new(|c: &GuardContext<'_>| c.to % 2 == 0);
        let c = ctx(Some(3), 4, Direction::Next);

        assert_eq!(guard.check(&c), guard.check(&c));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = StepGuard::new(|c: &GuardContext<'_>| c.from.is_none());
        let cloned = guard.clone();

        assert_eq!(
            guard.check(&ctx(None, 0, Direction::Start)),
            cloned.check(&ctx(None, 0, Direction::Start))
        );
    }
}
