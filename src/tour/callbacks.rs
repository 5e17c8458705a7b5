//! Lifecycle callbacks invoked synchronously at transitions.

use std::fmt;

type Hook = Box<dyn Fn() + Send + Sync>;
type StepChangeHook = Box<dyn Fn(usize, usize) + Send + Sync>;
type IndexHook = Box<dyn Fn(usize) + Send + Sync>;

/// User-supplied lifecycle handlers.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use tourguide::tour::TourCallbacks;
///
/// let moves = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&moves);
/// let callbacks = TourCallbacks::new()
///     .on_step_change(move |_old, _new| {
///         counter.fetch_add(1, Ordering::SeqCst);
///     });
///
/// callbacks.step_changed(0, 1);
/// assert_eq!(moves.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct TourCallbacks {
    on_start: Option<Hook>,
    on_step_change: Option<StepChangeHook>,
    on_complete: Option<Hook>,
    on_stop: Option<Hook>,
    on_skip: Option<IndexHook>,
}

impl TourCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called with `(old, new)` whenever the current step changes.
    pub fn on_step_change<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_step_change = Some(Box::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_stop<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_stop = Some(Box::new(f));
        self
    }

    /// Called with the current index when the user skips the tour.
    pub fn on_skip<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_skip = Some(Box::new(f));
        self
    }

    pub(crate) fn started(&self) {
        if let Some(f) = &self.on_start {
            f();
        }
    }

    pub(crate) fn step_changed(&self, old: usize, new: usize) {
        if let Some(f) = &self.on_step_change {
            f(old, new);
        }
    }

    pub(crate) fn completed(&self) {
        if let Some(f) = &self.on_complete {
            f();
        }
    }

    pub(crate) fn stopped(&self) {
        if let Some(f) = &self.on_stop {
            f();
        }
    }

    pub(crate) fn skipped(&self, index: usize) {
        if let Some(f) = &self.on_skip {
            f(index);
        }
    }
}

impl fmt::Debug for TourCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_step_change", &self.on_step_change.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .field("on_skip", &self.on_skip.is_some())
            .finish()
    }
}
