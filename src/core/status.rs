//! Lifecycle status of a tour and the vocabulary of transitions.
//!
//! All methods are pure - they inspect a value without side effects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a tour.
///
/// ```text
/// NotStarted -> Running -> { Finished, Stopped }
///               Running <-> Paused
/// ```
///
/// # Example
///
/// ```rust
/// use tourguide::core::TourStatus;
///
/// assert_eq!(TourStatus::default(), TourStatus::NotStarted);
/// assert!(TourStatus::Finished.is_final());
/// assert!(TourStatus::Paused.is_active());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum TourStatus {
    /// Steps may still be registered.
    #[default]
    NotStarted,
    /// A step is on screen.
    Running,
    /// Progress is kept but the view is detached.
    Paused,
    /// The user walked past the last step.
    Finished,
    /// The tour was abandoned.
    Stopped,
}

impl TourStatus {
    /// Get the status name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Finished => "Finished",
            Self::Stopped => "Stopped",
        }
    }

    /// Check if this is a terminal status.
    ///
    /// A terminal tour only leaves its status through an explicit reset.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Finished | Self::Stopped)
    }

    /// Check if the tour holds a valid current step.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation requested on a tour, used in errors and history records.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Operation {
    AddStep,
    Start,
    Next,
    Previous,
    GoTo,
    Pause,
    Resume,
    Stop,
    Skip,
    Finish,
    Reset,
    Refresh,
    Restore,
    Configure,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AddStep => "add_step",
            Self::Start => "start",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::GoTo => "go_to",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
            Self::Skip => "skip",
            Self::Finish => "finish",
            Self::Reset => "reset",
            Self::Refresh => "refresh",
            Self::Restore => "restore",
            Self::Configure => "configure",
        };
        f.write_str(name)
    }
}

/// Direction of travel when entering a step.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Direction {
    Start,
    Next,
    Previous,
    Jump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_name_returns_correct_value() {
        assert_eq!(TourStatus::NotStarted.name(), "NotStarted");
        assert_eq!(TourStatus::Running.name(), "Running");
        assert_eq!(TourStatus::Paused.name(), "Paused");
        assert_eq!(TourStatus::Finished.name(), "Finished");
        assert_eq!(TourStatus::Stopped.name(), "Stopped");
    }

    #[test]
    fn is_final_identifies_terminal_statuses() {
        assert!(!TourStatus::NotStarted.is_final());
        assert!(!TourStatus::Running.is_final());
        assert!(!TourStatus::Paused.is_final());
        assert!(TourStatus::Finished.is_final());
        assert!(TourStatus::Stopped.is_final());
    }

    #[test]
    fn is_active_covers_running_and_paused() {
        assert!(TourStatus::Running.is_active());
        assert!(TourStatus::Paused.is_active());
        assert!(!TourStatus::NotStarted.is_active());
        assert!(!TourStatus::Finished.is_active());
    }

    #[test]
    fn status_serializes_as_its_name() {
        let json = serde_json::to_string(&TourStatus::Running).unwrap();
        assert_eq!(json, "\"Running\"");
        let back: TourStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TourStatus::Running);
    }

    #[test]
    fn operation_display_is_snake_case() {
        assert_eq!(Operation::GoTo.to_string(), "go_to");
        assert_eq!(Operation::AddStep.to_string(), "add_step");
    }

    #[test]
    fn direction_serializes_as_its_name() {
        let json = serde_json::to_string(&Direction::Previous).unwrap();
        assert_eq!(json, "\"Previous\"");
    }
}
