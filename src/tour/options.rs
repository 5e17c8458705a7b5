//! Tour-level configuration.

use super::keyboard::KeyboardNavigation;
use crate::step::NavigationButtons;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Button captions handed to the rendering adapter.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonLabels {
    pub skip: String,
    pub previous: String,
    pub next: String,
    pub stop: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            skip: "Skip tour".to_string(),
            previous: "Previous".to_string(),
            next: "Next".to_string(),
            stop: "Finish".to_string(),
        }
    }
}

/// Options recognised for a tour.
///
/// # Example
///
/// ```rust
/// use tourguide::tour::TourOptions;
///
/// let options = TourOptions::default().skip_missing_targets(true).persist(true);
/// assert!(options.skip_missing_targets);
/// assert!(options.persist);
/// assert!(!options.highlight);
/// ```
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TourOptions {
    /// Advance past steps whose target cannot be resolved
    pub skip_missing_targets: bool,
    /// Save progress to the directory's store after every transition
    pub persist: bool,
    /// Highlight the target of every step unless a step overrides it
    pub highlight: bool,
    pub use_keyboard_navigation: KeyboardNavigation,
    pub enabled_buttons: NavigationButtons,
    pub labels: ButtonLabels,
    /// Start the tour when the host attaches it
    pub start_on_attach: bool,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, Value>,
}

impl TourOptions {
    pub fn skip_missing_targets(mut self, skip: bool) -> Self {
        self.skip_missing_targets = skip;
        self
    }

    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn keyboard(mut self, keyboard: KeyboardNavigation) -> Self {
        self.use_keyboard_navigation = keyboard;
        self
    }

    pub fn enabled_buttons(mut self, buttons: NavigationButtons) -> Self {
        self.enabled_buttons = buttons;
        self
    }

    pub fn labels(mut self, labels: ButtonLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn start_on_attach(mut self, start: bool) -> Self {
        self.start_on_attach = start;
        self
    }
}
