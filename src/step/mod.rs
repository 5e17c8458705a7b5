//! Step descriptors and the per-tour step registry.

mod descriptor;
mod params;
mod registry;

pub use descriptor::{StepDescriptor, Target};
pub use params::{NavigationButtons, Placement, StepParams};
pub use registry::{RegistryError, StepRegistry};
