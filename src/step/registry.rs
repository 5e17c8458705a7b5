//! Ordered collection of the steps of one tour.

use super::descriptor::StepDescriptor;
use thiserror::Error;

/// Errors raised by the step registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("steps are locked once the tour has started")]
    Sealed,

    #[error("step index {index} out of range (tour has {len} steps)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Append-only list of step descriptors.
///
/// The registry is sealed when its tour starts; from then on the sequence is
/// immutable until the tour is reset.
#[derive(Clone, Debug, Default)]
pub struct StepRegistry {
    steps: Vec<StepDescriptor>,
    sealed: bool,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, returning its position.
    pub fn add_step(&mut self, descriptor: StepDescriptor) -> Result<usize, RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        let order = self.steps.len();
        self.steps.push(descriptor.with_order(order));
        Ok(order)
    }

    pub fn get_step(&self, index: usize) -> Result<&StepDescriptor, RegistryError> {
        self.steps.get(index).ok_or(RegistryError::IndexOutOfRange {
            index,
            len: self.steps.len(),
        })
    }

    pub fn size(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last step, `None` for an empty registry.
    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    pub(crate) fn unseal(&mut self) {
        self.sealed = false;
    }
}
