//! Validation of tour definitions.
//!
//! Checks accumulate: a definition with several problems reports all of
//! them at once instead of stopping at the first.

use super::error::ConfigIssue;
use super::TourDefinition;
use crate::step::StepDescriptor;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub(crate) type Checked = Validation<(), NonEmptyVec<ConfigIssue>>;

/// Check a whole definition.
pub fn validate_definition(definition: &TourDefinition) -> Checked {
    let mut checks: Vec<Checked> = Vec::new();

    checks.push(if definition.name.trim().is_empty() {
        Validation::fail(ConfigIssue::EmptyName)
    } else {
        Validation::success(())
    });

    checks.push(if definition.steps.is_empty() {
        Validation::fail(ConfigIssue::NoSteps)
    } else {
        Validation::success(())
    });

    for (index, step) in definition.steps.iter().enumerate() {
        checks.push(validate_step(index, step));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Check one step at position `index`.
pub fn validate_step(index: usize, step: &StepDescriptor) -> Checked {
    // An absent target means a centered step; an empty one is a typo.
    let target = if step
        .target()
        .is_some_and(|target| target.selector().trim().is_empty())
    {
        Validation::fail(ConfigIssue::BlankTarget { index })
    } else {
        Validation::success(())
    };

    let content = if step.content().trim().is_empty() {
        Validation::fail(ConfigIssue::BlankContent { index })
    } else {
        Validation::success(())
    };

    Validation::all_vec(vec![target, content]).map(|_| ())
}
