//! The tour state machine and its configuration.
//!
//! # Key Concepts
//!
//! - **Tour**: per-tour controller holding the current step and status
//! - **Options**: tour-level configuration with a closed set of fields
//! - **Callbacks**: lifecycle handlers invoked synchronously at transitions
//! - **Keyboard**: arrow/escape shortcuts for a running tour

mod callbacks;
mod error;
mod keyboard;
mod machine;
mod options;

pub use callbacks::TourCallbacks;
pub use error::{StateConflict, TourError};
pub use keyboard::{KeyAction, KeyboardNavigation, NavigationKey};
pub use machine::{Tour, HISTORY_LIMIT};
pub use options::{ButtonLabels, TourOptions};
