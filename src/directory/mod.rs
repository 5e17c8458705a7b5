//! Lookup of tours by stable name.
//!
//! A [`TourDirectory`] is an explicitly owned object: create one at startup
//! and pass it (or an `Arc` of it) to whichever component needs to find a
//! tour. Every tour it creates shares the directory's rendering adapter and,
//! when configured, its progress store.

mod handle;

pub use handle::{Snapshot, TourHandle};

use crate::config::TourDefinition;
use crate::persist::ProgressStore;
use crate::render::RenderAdapter;
use crate::tour::{Tour, TourError, TourOptions};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Mapping from tour name to tour.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tourguide::directory::TourDirectory;
/// use tourguide::render::NoopAdapter;
/// use tourguide::step::StepDescriptor;
///
/// let directory = TourDirectory::new(Arc::new(NoopAdapter));
/// let intro = directory.get_or_create("intro");
/// intro.add_step(StepDescriptor::new("Welcome")).unwrap();
///
/// let again = directory.get_or_create("intro");
/// assert_eq!(again.snapshot().len, 1);
/// assert_eq!(directory.list().collect::<Vec<_>>(), vec!["intro".to_string()]);
/// ```
pub struct TourDirectory {
    tours: Mutex<BTreeMap<String, TourHandle>>,
    adapter: Arc<dyn RenderAdapter>,
    store: Option<Arc<dyn ProgressStore>>,
    defaults: TourOptions,
}

impl TourDirectory {
    pub fn new(adapter: Arc<dyn RenderAdapter>) -> Self {
        Self {
            tours: Mutex::new(BTreeMap::new()),
            adapter,
            store: None,
            defaults: TourOptions::default(),
        }
    }

    /// Store used by tours whose options enable `persist`.
    pub fn with_store(mut self, store: Arc<dyn ProgressStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Options given to tours created through [`get_or_create`](Self::get_or_create).
    pub fn with_defaults(mut self, options: TourOptions) -> Self {
        self.defaults = options;
        self
    }

    /// Return the tour called `name`, creating it with the default options.
    pub fn get_or_create(&self, name: &str) -> TourHandle {
        self.get_or_create_with(name, self.defaults.clone())
    }

    /// Same as [`get_or_create`](Self::get_or_create).
    pub fn register_tour(&self, name: &str) -> TourHandle {
        self.get_or_create(name)
    }

    /// Return the tour called `name`, creating it with `options` if absent.
    ///
    /// `options` are ignored when the tour already exists. A newly created
    /// tour with `persist` set picks up progress saved by an earlier session;
    /// it is applied by the first `start`.
    pub fn get_or_create_with(&self, name: &str, options: TourOptions) -> TourHandle {
        let mut tours = self.lock();
        if let Some(existing) = tours.get(name) {
            return existing.clone();
        }
        let handle = TourHandle::new(self.create(name, options));
        tours.insert(name.to_string(), handle.clone());
        handle
    }

    pub fn get(&self, name: &str) -> Option<TourHandle> {
        self.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Detach a tour from the directory. Absent names are ignored.
    ///
    /// Handles held elsewhere stay usable; the name can be registered again.
    pub fn remove(&self, name: &str) -> Option<TourHandle> {
        let removed = self.lock().remove(name);
        if removed.is_some() {
            debug!(tour = %name, "tour removed from directory");
        }
        removed
    }

    /// Names of the registered tours in sorted order.
    ///
    /// The iterator owns a copy of the names taken at call time; clone it to
    /// walk the same sequence again.
    pub fn list(&self) -> impl Iterator<Item = String> + Clone {
        self.lock().keys().cloned().collect::<Vec<_>>().into_iter()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Register a tour described by a definition.
    pub fn load(&self, definition: TourDefinition) -> Result<TourHandle, TourError> {
        let TourDefinition {
            name,
            options,
            steps,
        } = definition;

        let handle = {
            let mut tours = self.lock();
            if tours.contains_key(&name) {
                return Err(TourError::DuplicateTour { tour: name });
            }
            let handle = TourHandle::new(self.create(&name, options));
            tours.insert(name.clone(), handle.clone());
            handle
        };
        for step in steps {
            handle.add_step(step)?;
        }
        info!(tour = %name, steps = handle.snapshot().len, "tour definition loaded");
        Ok(handle)
    }

    /// Detach every tour and empty the directory.
    ///
    /// Running tours are paused first so persisted progress reflects where
    /// the user left off.
    pub fn teardown(&self) {
        let tours = std::mem::take(&mut *self.lock());
        for (name, handle) in tours {
            if let Err(e) = handle.detach() {
                warn!(tour = %name, error = %e, "failed to detach tour during teardown");
            }
        }
        debug!("tour directory torn down");
    }

    fn create(&self, name: &str, options: TourOptions) -> Tour {
        let mut tour = Tour::new(name, Arc::clone(&self.adapter));
        tour.set_options(options);
        if let Some(store) = &self.store {
            tour.set_store(Arc::clone(store));
            tour.load_stored_progress();
        }
        debug!(tour = %name, "tour created");
        tour
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, TourHandle>> {
        self.tours.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TourDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourDirectory")
            .field("tours", &self.list().collect::<Vec<_>>())
            .field("persistent", &self.store.is_some())
            .finish()
    }
}
