//! Core vocabulary of the tour state machine.
//!
//! This module contains the pure building blocks the machine is made of:
//! - `TourStatus`, `Operation` and `Direction`
//! - Step guard predicates
//! - Immutable transition history

mod guard;
mod history;
mod status;

pub use guard::{GuardContext, StepGuard};
pub use history::{TourHistory, TransitionRecord};
pub use status::{Direction, Operation, TourStatus};
