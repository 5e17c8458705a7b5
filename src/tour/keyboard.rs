//! Keyboard shortcuts for driving a running tour.

use serde::{Deserialize, Serialize};

/// Keys the tour reacts to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NavigationKey {
    ArrowRight,
    ArrowLeft,
    Escape,
}

/// What a key press asks the tour to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Next,
    Previous,
    Stop,
}

impl NavigationKey {
    pub fn action(&self) -> KeyAction {
        match self {
            Self::ArrowRight => KeyAction::Next,
            Self::ArrowLeft => KeyAction::Previous,
            Self::Escape => KeyAction::Stop,
        }
    }
}

/// Keyboard navigation setting: `true`/`false` or an explicit list of keys.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyboardNavigation {
    Enabled(bool),
    Keys(Vec<NavigationKey>),
}

impl Default for KeyboardNavigation {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

impl KeyboardNavigation {
    pub fn is_enabled(&self, key: NavigationKey) -> bool {
        match self {
            Self::Enabled(enabled) => *enabled,
            Self::Keys(keys) => keys.contains(&key),
        }
    }
}
