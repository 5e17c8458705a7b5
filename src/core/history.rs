//! Tour transition history tracking.
//!
//! Every committed transition of a tour is kept as an immutable record so a
//! host can inspect how a user moved through the tour.

use super::status::{Operation, TourStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use tourguide::core::{Operation, TourStatus, TransitionRecord};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let record = TransitionRecord {
///     operation: Operation::Start,
///     from_status: TourStatus::NotStarted,
///     to_status: TourStatus::Running,
///     from_index: None,
///     to_index: Some(0),
///     run_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
/// };
/// assert!(record.changed_step());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The operation that caused the transition
    pub operation: Operation,
    /// Status before the transition
    pub from_status: TourStatus,
    /// Status after the transition
    pub to_status: TourStatus,
    /// Current step before the transition
    pub from_index: Option<usize>,
    /// Current step after the transition
    pub to_index: Option<usize>,
    /// Run the transition belongs to
    pub run_id: Uuid,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Whether the transition moved the tour to a different step.
    pub fn changed_step(&self) -> bool {
        self.from_index != self.to_index
    }
}

/// Ordered history of tour transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TourHistory {
    transitions: Vec<TransitionRecord>,
}

impl TourHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// ```rust
    /// use tourguide::core::{Operation, TourHistory, TourStatus, TransitionRecord};
    /// use chrono::Utc;
    /// use uuid::Uuid;
    ///
    /// let history = TourHistory::new();
    /// let updated = history.record(TransitionRecord {
    ///     operation: Operation::Start,
    ///     from_status: TourStatus::NotStarted,
    ///     to_status: TourStatus::Running,
    ///     from_index: None,
    ///     to_index: Some(0),
    ///     run_id: Uuid::new_v4(),
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(updated.transitions().len(), 1);
    /// assert_eq!(history.transitions().len(), 0); // Original unchanged
    /// ```
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place, dropping the oldest records so that at
    /// most `limit` remain.
    pub fn push(&mut self, transition: TransitionRecord, limit: usize) {
        self.transitions.push(transition);
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
    }

    /// Forget every recorded transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Get the sequence of steps the user was shown.
    ///
    /// Consecutive duplicates (pause/resume, refresh) are collapsed.
    pub fn get_path(&self) -> Vec<usize> {
        let mut path: Vec<usize> = Vec::new();
        for index in self.transitions.iter().filter_map(|t| t.to_index) {
            if path.last() != Some(&index) {
                path.push(index);
            }
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// Get the most recent transition.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }
}
