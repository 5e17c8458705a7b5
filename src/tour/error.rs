//! Tour error types.

use crate::core::{Operation, TourStatus};
use crate::persist::PersistenceError;
use crate::render::RenderFailure;
use crate::step::{RegistryError, Target};
use std::fmt;
use thiserror::Error;

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateConflict {
    /// The tour is in a status that does not permit the operation
    Status(TourStatus),
    /// Another transition of the same tour is still executing
    MidTransition,
}

impl fmt::Display for StateConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "tour is {}", status),
            Self::MidTransition => f.write_str("another transition is in progress"),
        }
    }
}

/// Errors returned by tour operations.
///
/// Every error leaves the tour in a well-defined state; none is fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TourError {
    /// The operation is not allowed right now. Check `status()` first.
    #[error("cannot {operation} tour '{tour}': {conflict}")]
    InvalidState {
        tour: String,
        operation: Operation,
        conflict: StateConflict,
    },

    #[error("step index {index} out of range (tour has {len} steps)")]
    IndexOutOfRange { index: usize, len: usize },

    /// `start` was called before any step was registered.
    #[error("tour '{tour}' has no steps")]
    EmptyTour { tour: String },

    /// The adapter could not resolve the anchor of the current step.
    #[error("target '{target}' of step {index} in tour '{tour}' not found")]
    TargetNotFound {
        tour: String,
        index: usize,
        target: Target,
    },

    /// The adapter failed to display a step. Tour state is unaffected.
    #[error("failed to render step {index} of tour '{tour}': {source}")]
    RenderFailure {
        tour: String,
        index: usize,
        #[source]
        source: RenderFailure,
    },

    /// A step's `before` guard refused entry.
    #[error("step {index} of tour '{tour}' refused entry")]
    GuardRejected { tour: String, index: usize },

    /// A tour with this name is already registered.
    #[error("tour '{tour}' is already registered")]
    DuplicateTour { tour: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl TourError {
    pub(crate) fn invalid(tour: &str, operation: Operation, status: TourStatus) -> Self {
        Self::InvalidState {
            tour: tour.to_string(),
            operation,
            conflict: StateConflict::Status(status),
        }
    }

    pub(crate) fn busy(tour: &str, operation: Operation) -> Self {
        Self::InvalidState {
            tour: tour.to_string(),
            operation,
            conflict: StateConflict::MidTransition,
        }
    }

    pub(crate) fn from_registry(
        tour: &str,
        operation: Operation,
        status: TourStatus,
        err: RegistryError,
    ) -> Self {
        match err {
            RegistryError::Sealed => Self::invalid(tour, operation, status),
            RegistryError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
        }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}
