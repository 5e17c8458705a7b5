//! Build errors for the tour builder.

use crate::tour::TourError;
use thiserror::Error;

/// Errors that can occur when building a tour.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Tour name is empty. Pass a non-blank name to TourBuilder::new")]
    EmptyName,

    #[error("Rendering adapter not specified. Call .adapter(adapter) before .build()")]
    MissingAdapter,

    #[error("Step {index} could not be registered")]
    InvalidStep {
        index: usize,
        #[source]
        source: TourError,
    },
}
