//! Declarative tour definitions.
//!
//! A definition bundles a tour's name, options and steps so a whole tour can
//! be shipped as a JSON document:
//!
//! ```json
//! {
//!   "name": "intro",
//!   "options": { "skip_missing_targets": true },
//!   "steps": [
//!     { "content": "Welcome!" },
//!     { "target": "#search", "header": "Search", "content": "Find anything here",
//!       "params": { "placement": "top" } }
//!   ]
//! }
//! ```
//!
//! Unknown keys inside `options` and `params` are kept aside and reported
//! with a warning when the tour is built. Unknown keys anywhere else are a
//! parse error.

pub mod error;
pub mod validate;

pub use error::{ConfigError, ConfigIssue};
pub use validate::{validate_definition, validate_step};

use crate::step::StepDescriptor;
use crate::tour::TourOptions;
use serde::Deserialize;
use std::path::Path;
use stillwater::validation::Validation;

/// A complete tour in declarative form.
///
/// # Example
///
/// ```rust
/// use tourguide::config::TourDefinition;
///
/// let def = TourDefinition::from_json(
///     r#"{ "name": "intro", "steps": [ { "content": "Welcome" } ] }"#,
/// ).unwrap();
/// assert_eq!(def.name, "intro");
/// assert_eq!(def.steps.len(), 1);
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TourDefinition {
    pub name: String,
    #[serde(default)]
    pub options: TourOptions,
    pub steps: Vec<StepDescriptor>,
}

impl TourDefinition {
    /// Parse and validate a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let definition: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Read, parse and validate a JSON definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Report every problem with the definition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match validate_definition(self) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(ConfigError::Invalid {
                issues: errors.iter().cloned().collect(),
            }),
        }
    }
}
