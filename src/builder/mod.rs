//! Builder API for ergonomic tour construction.

pub mod error;
pub mod tour;

pub use error::BuildError;
pub use tour::TourBuilder;
