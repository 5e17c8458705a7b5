//! Shareable handle to a registered tour.

use crate::core::{Operation, TourStatus};
use crate::persist::ProgressRecord;
use crate::step::StepDescriptor;
use crate::tour::{KeyAction, NavigationKey, Tour, TourCallbacks, TourError, TourOptions};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock, TryLockError};

/// Position of a tour as of its last completed operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub status: TourStatus,
    pub current_index: Option<usize>,
    pub len: usize,
}

impl Snapshot {
    fn of(tour: &Tour) -> Self {
        Self {
            status: tour.status(),
            current_index: tour.current_index(),
            len: tour.len(),
        }
    }
}

/// Cloneable handle to one tour in a [`TourDirectory`](super::TourDirectory).
///
/// Transitions never wait for the tour: a call that arrives while another
/// transition of the same tour is executing (for instance from inside a
/// lifecycle callback) fails with [`TourError::InvalidState`]. Read-only
/// accessors use a snapshot published after every operation and never
/// block.
#[derive(Clone)]
pub struct TourHandle {
    name: Arc<str>,
    tour: Arc<Mutex<Tour>>,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl TourHandle {
    pub(crate) fn new(tour: Tour) -> Self {
        let snapshot = Snapshot::of(&tour);
        Self {
            name: Arc::from(tour.name()),
            tour: Arc::new(Mutex::new(tour)),
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TourStatus {
        self.snapshot().status
    }

    pub fn current_index(&self) -> Option<usize> {
        self.snapshot().current_index
    }

    pub fn snapshot(&self) -> Snapshot {
        *self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the tour, or `None` while a transition is executing.
    pub fn inspect<T>(&self, f: impl FnOnce(&Tour) -> T) -> Option<T> {
        match self.tour.try_lock() {
            Ok(tour) => Some(f(&*tour)),
            Err(TryLockError::Poisoned(poisoned)) => Some(f(&*poisoned.into_inner())),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    pub fn add_step(&self, descriptor: StepDescriptor) -> Result<usize, TourError> {
        self.with(Operation::AddStep, |tour| tour.add_step(descriptor))
    }

    pub fn set_options(&self, options: TourOptions) -> Result<(), TourError> {
        self.with(Operation::Configure, |tour| {
            tour.set_options(options);
            Ok(())
        })
    }

    pub fn set_callbacks(&self, callbacks: TourCallbacks) -> Result<(), TourError> {
        self.with(Operation::Configure, |tour| {
            tour.set_callbacks(callbacks);
            Ok(())
        })
    }

    pub fn start(&self) -> Result<(), TourError> {
        self.with(Operation::Start, Tour::start)
    }

    pub fn start_at(&self, index: usize) -> Result<(), TourError> {
        self.with(Operation::Start, |tour| tour.start_at(index))
    }

    pub fn next(&self) -> Result<(), TourError> {
        self.with(Operation::Next, Tour::next)
    }

    pub fn previous(&self) -> Result<(), TourError> {
        self.with(Operation::Previous, Tour::previous)
    }

    pub fn go_to(&self, index: usize) -> Result<(), TourError> {
        self.with(Operation::GoTo, |tour| tour.go_to(index))
    }

    pub fn pause(&self) -> Result<(), TourError> {
        self.with(Operation::Pause, Tour::pause)
    }

    pub fn resume(&self) -> Result<(), TourError> {
        self.with(Operation::Resume, Tour::resume)
    }

    pub fn stop(&self) -> Result<(), TourError> {
        self.with(Operation::Stop, Tour::stop)
    }

    pub fn skip(&self) -> Result<(), TourError> {
        self.with(Operation::Skip, Tour::skip)
    }

    pub fn finish(&self) -> Result<(), TourError> {
        self.with(Operation::Finish, Tour::finish)
    }

    pub fn reset(&self) -> Result<(), TourError> {
        self.with(Operation::Reset, Tour::reset)
    }

    pub fn refresh(&self) -> Result<(), TourError> {
        self.with(Operation::Refresh, Tour::refresh)
    }

    pub fn restore(&self, record: ProgressRecord) -> Result<(), TourError> {
        self.with(Operation::Restore, |tour| tour.restore(record))
    }

    pub fn attach(&self) -> Result<(), TourError> {
        self.with(Operation::Resume, Tour::attach)
    }

    pub fn detach(&self) -> Result<(), TourError> {
        self.with(Operation::Pause, Tour::detach)
    }

    pub fn handle_key(&self, key: NavigationKey) -> Result<bool, TourError> {
        let operation = match key.action() {
            KeyAction::Next => Operation::Next,
            KeyAction::Previous => Operation::Previous,
            KeyAction::Stop => Operation::Stop,
        };
        self.with(operation, |tour| tour.handle_key(key))
    }

    fn with<T>(
        &self,
        operation: Operation,
        f: impl FnOnce(&mut Tour) -> Result<T, TourError>,
    ) -> Result<T, TourError> {
        let mut tour = match self.tour.try_lock() {
            Ok(tour) => tour,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return Err(TourError::busy(&self.name, operation)),
        };
        let result = f(&mut *tour);
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Snapshot::of(&tour);
        result
    }
}

impl fmt::Debug for TourHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourHandle")
            .field("name", &self.name)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
