//! Contract with the rendering layer.
//!
//! The tour never queries the UI or does layout itself. It asks a
//! [`RenderAdapter`] to resolve targets and to show or hide the overlay, and
//! always pushes the full [`StepView`] so the adapter has no position state
//! of its own.

use crate::step::{Placement, StepDescriptor, Target};
use crate::tour::ButtonLabels;
use thiserror::Error;

/// Opaque handle to a resolved UI element, minted by the adapter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ElementHandle(u64);

impl ElementHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Outcome of resolving a step's target.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TargetResolution {
    Found(ElementHandle),
    NotFound,
}

/// Error reported by the adapter when it cannot display a step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct RenderFailure {
    pub reason: String,
}

impl RenderFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Effective visibility of the navigation buttons for one step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ButtonState {
    pub skip: bool,
    pub previous: bool,
    pub next: bool,
    pub stop: bool,
}

/// Everything the adapter needs to draw a step.
#[derive(Clone, Debug)]
pub struct StepView<'a> {
    pub tour: &'a str,
    pub index: usize,
    pub total: usize,
    pub step: &'a StepDescriptor,
    pub placement: Placement,
    pub highlight: bool,
    pub buttons: ButtonState,
    pub labels: &'a ButtonLabels,
}

impl StepView<'_> {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Capabilities the hosting UI layer provides to the tour.
///
/// Implementations use interior mutability; the tour calls them while it
/// holds its own lock, so an adapter must not drive the same tour from
/// inside these methods (such calls are rejected as mid-transition).
pub trait RenderAdapter: Send + Sync {
    fn resolve_target(&self, target: &Target) -> TargetResolution;

    /// `element` is `None` for centered steps.
    fn show_step(
        &self,
        view: &StepView<'_>,
        element: Option<ElementHandle>,
    ) -> Result<(), RenderFailure>;

    fn hide_overlay(&self);
}

/// Adapter that renders nothing and resolves every target.
///
/// Useful for driving tours headless, e.g. when replaying persisted progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAdapter;

impl RenderAdapter for NoopAdapter {
    fn resolve_target(&self, _target: &Target) -> TargetResolution {
        TargetResolution::Found(ElementHandle::new(0))
    }

    fn show_step(
        &self,
        _view: &StepView<'_>,
        _element: Option<ElementHandle>,
    ) -> Result<(), RenderFailure> {
        Ok(())
    }

    fn hide_overlay(&self) {}
}
