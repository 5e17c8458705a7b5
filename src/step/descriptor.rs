//! Step descriptors.

use super::params::{Placement, StepParams};
use crate::core::{GuardContext, StepGuard};
use serde::Deserialize;
use std::fmt;

/// Reference to the element a step anchors to.
///
/// The core never interprets the selector; it only hands it to the
/// rendering adapter.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    pub fn selector(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::new(selector)
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self(selector)
    }
}

/// One stage of a tour.
///
/// A descriptor is immutable once registered; `order` is assigned by the
/// registry.
///
/// # Example
///
/// ```rust
/// use tourguide::step::{Placement, StepDescriptor};
///
/// let step = StepDescriptor::new("Search anything from here")
///     .with_target("#search")
///     .with_header("Search")
///     .with_placement(Placement::Top);
///
/// assert_eq!(step.target().map(|t| t.selector()), Some("#search"));
/// assert!(!step.is_centered());
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDescriptor {
    #[serde(default)]
    target: Option<Target>,
    #[serde(default)]
    header: Option<String>,
    content: String,
    #[serde(default)]
    params: StepParams,
    #[serde(skip)]
    order: usize,
    #[serde(skip)]
    before: Option<StepGuard>,
}

impl StepDescriptor {
    /// Create a centered step with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            target: None,
            header: None,
            content: content.into(),
            params: StepParams::default(),
            order: 0,
            before: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_params(mut self, params: StepParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.params.placement = placement;
        self
    }

    /// Attach a guard evaluated before this step is entered.
    pub fn before<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&GuardContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.before = Some(StepGuard::new(predicate));
        self
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }

    /// Position within the tour.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn guard(&self) -> Option<&StepGuard> {
        self.before.as_ref()
    }

    /// A step without a target is shown as a centered modal.
    pub fn is_centered(&self) -> bool {
        self.target.is_none()
    }

    pub(crate) fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub(crate) fn params_mut(&mut self) -> &mut StepParams {
        &mut self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;

    #[test]
    fn new_step_is_centered() {
        let step = StepDescriptor::new("Welcome");
        assert!(step.is_centered());
        assert_eq!(step.content(), "Welcome");
        assert!(step.header().is_none());
        assert!(step.guard().is_none());
    }

    #[test]
    fn deserializes_from_json() {
        let step: StepDescriptor = serde_json::from_str(
            r##"{"target":"#nav","header":"Menu","content":"Open it","params":{"placement":"right"}}"##,
        )
        .unwrap();

        assert_eq!(step.target(), Some(&Target::new("#nav")));
        assert_eq!(step.header(), Some("Menu"));
        assert_eq!(step.params().placement, Placement::Right);
        assert_eq!(step.order(), 0);
    }

    #[test]
    fn rejects_unknown_top_level_keys() {
        let result: Result<StepDescriptor, _> =
            serde_json::from_str(r#"{"content":"x","colour":"red"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn before_attaches_guard() {
        let step = StepDescriptor::new("x").before(|ctx| ctx.direction == Direction::Next);
        let ctx = GuardContext {
            tour: "t",
            from: Some(0),
            to: 1,
            direction: Direction::Next,
        };

        assert!(step.guard().is_some_and(|g| g.check(&ctx)));
    }
}
