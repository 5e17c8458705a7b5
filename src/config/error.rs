//! Configuration error types.

use thiserror::Error;

/// A single problem found in a tour definition
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("tour name is empty")]
    EmptyName,

    #[error("tour has no steps")]
    NoSteps,

    #[error("step {index} has a blank target")]
    BlankTarget { index: usize },

    #[error("step {index} has no content")]
    BlankContent { index: usize },
}

/// Errors that can occur while loading a tour definition
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the definition shape
    #[error("Failed to parse tour definition: {0}")]
    Parse(String),

    #[error("Failed to read tour definition: {0}")]
    Io(#[from] std::io::Error),

    /// Every problem found, not just the first
    #[error("Invalid tour definition: {}", join_issues(.issues))]
    Invalid { issues: Vec<ConfigIssue> },
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
