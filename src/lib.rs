//! Tourguide: guided product tours as an explicit state machine
//!
//! A tour walks the user through an ordered list of steps, each anchored to
//! an element of the host UI or centered on screen. The library owns the
//! tour's position and lifecycle; drawing is delegated to a
//! [`RenderAdapter`](render::RenderAdapter) supplied by the host.
//!
//! # Core Concepts
//!
//! - **Step Registry**: ordered, append-only list of step descriptors
//! - **Tour**: state machine over `NotStarted`, `Running`, `Paused`,
//!   `Finished` and `Stopped`
//! - **Directory**: lookup of tours by name
//! - **Rendering Adapter**: host capability to resolve targets and draw steps
//! - **Persistence**: optional `{index, status}` record saved after every
//!   transition
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tourguide::core::TourStatus;
//! use tourguide::directory::TourDirectory;
//! use tourguide::render::NoopAdapter;
//! use tourguide::step::StepDescriptor;
//! use tourguide::tour::TourCallbacks;
//!
//! let directory = TourDirectory::new(Arc::new(NoopAdapter));
//! let intro = directory.register_tour("intro");
//! intro.add_step(StepDescriptor::new("Welcome!")).unwrap();
//! intro.add_step(StepDescriptor::new("Search here").with_target("#search")).unwrap();
//! intro
//!     .set_callbacks(TourCallbacks::new().on_step_change(|old, new| {
//!         println!("step {} -> {}", old, new);
//!     }))
//!     .unwrap();
//!
//! intro.start().unwrap();
//! intro.next().unwrap();
//! assert_eq!(intro.current_index(), Some(1));
//!
//! intro.next().unwrap();
//! assert_eq!(intro.status(), TourStatus::Finished);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod directory;
pub mod persist;
pub mod render;
pub mod step;
pub mod tour;

// Re-export commonly used types
pub use builder::{BuildError, TourBuilder};
pub use config::{ConfigError, TourDefinition};
pub use crate::core::{Operation, TourStatus};
pub use directory::{TourDirectory, TourHandle};
pub use persist::{JsonFileStore, MemoryStore, PersistenceError, ProgressRecord, ProgressStore};
pub use render::{RenderAdapter, RenderFailure};
pub use step::{StepDescriptor, StepParams, Target};
pub use tour::{Tour, TourCallbacks, TourError, TourOptions};
