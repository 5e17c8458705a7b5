//! Per-step display parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Where the popover sits relative to its target.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Auto,
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Which navigation buttons are enabled.
///
/// Missing keys default to enabled.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationButtons {
    pub skip: bool,
    pub previous: bool,
    pub next: bool,
    pub stop: bool,
}

impl Default for NavigationButtons {
    fn default() -> Self {
        Self {
            skip: true,
            previous: true,
            next: true,
            stop: true,
        }
    }
}

/// Display configuration for a single step.
///
/// `highlight` and `enabled_buttons` override the tour-level options when set.
/// Keys this crate does not recognise are collected in `unrecognized` and
/// ignored.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct StepParams {
    pub placement: Placement,
    pub enable_transition: bool,
    pub enable_scrolling: bool,
    pub highlight: Option<bool>,
    pub enabled_buttons: Option<NavigationButtons>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, Value>,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            enable_transition: true,
            enable_scrolling: true,
            highlight: None,
            enabled_buttons: None,
            unrecognized: BTreeMap::new(),
        }
    }
}

impl StepParams {
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn enabled_buttons(mut self, buttons: NavigationButtons) -> Self {
        self.enabled_buttons = Some(buttons);
        self
    }

    pub fn without_transition(mut self) -> Self {
        self.enable_transition = false;
        self
    }

    pub fn without_scrolling(mut self) -> Self {
        self.enable_scrolling = false;
        self
    }
}
