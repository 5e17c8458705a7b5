//! Builder for constructing tours.

use crate::builder::error::BuildError;
use crate::config::TourDefinition;
use crate::persist::ProgressStore;
use crate::render::RenderAdapter;
use crate::step::StepDescriptor;
use crate::tour::{Tour, TourCallbacks, TourOptions};
use std::sync::Arc;

/// Builder for constructing a standalone [`Tour`] with a fluent API.
///
/// Tours that should be found by name belong in a
/// [`TourDirectory`](crate::directory::TourDirectory) instead.
pub struct TourBuilder {
    name: String,
    adapter: Option<Arc<dyn RenderAdapter>>,
    options: TourOptions,
    callbacks: TourCallbacks,
    store: Option<Arc<dyn ProgressStore>>,
    steps: Vec<StepDescriptor>,
}

impl TourBuilder {
    /// Create a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adapter: None,
            options: TourOptions::default(),
            callbacks: TourCallbacks::new(),
            store: None,
            steps: Vec::new(),
        }
    }

    /// Start from a declarative definition.
    pub fn from_definition(definition: TourDefinition) -> Self {
        let TourDefinition {
            name,
            options,
            steps,
        } = definition;
        Self::new(name).options(options).steps(steps)
    }

    /// Set the rendering adapter (required).
    pub fn adapter(mut self, adapter: Arc<dyn RenderAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn options(mut self, options: TourOptions) -> Self {
        self.options = options;
        self
    }

    pub fn callbacks(mut self, callbacks: TourCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Set the progress store. Only consulted when `options.persist` is set.
    pub fn store(mut self, store: Arc<dyn ProgressStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Add one step.
    pub fn step(mut self, step: StepDescriptor) -> Self {
        self.steps.push(step);
        self
    }

    /// Add multiple steps at once.
    pub fn steps(mut self, steps: impl IntoIterator<Item = StepDescriptor>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Build the tour in `NotStarted`.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Tour, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyName);
        }
        let adapter = self.adapter.ok_or(BuildError::MissingAdapter)?;

        let mut tour = Tour::new(self.name, adapter);
        tour.set_options(self.options);
        tour.set_callbacks(self.callbacks);
        if let Some(store) = self.store {
            tour.set_store(store);
            tour.load_stored_progress();
        }
        for (index, step) in self.steps.into_iter().enumerate() {
            tour.add_step(step)
                .map_err(|source| BuildError::InvalidStep { index, source })?;
        }
        Ok(tour)
    }
}
