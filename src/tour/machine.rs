//! The tour state machine.

use super::callbacks::TourCallbacks;
use super::error::TourError;
use super::keyboard::{KeyAction, NavigationKey};
use super::options::TourOptions;
use crate::core::{
    Direction, GuardContext, Operation, TourHistory, TourStatus, TransitionRecord,
};
use crate::persist::{ProgressRecord, ProgressStore};
use crate::render::{ButtonState, ElementHandle, RenderAdapter, StepView, TargetResolution};
use crate::step::{StepDescriptor, StepRegistry, Target};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Transitions kept in a tour's history; older records are dropped.
pub const HISTORY_LIMIT: usize = 256;

/// Where a navigation attempt ends up after target resolution.
#[derive(Debug)]
enum Landing {
    /// The step can be shown (`element` is `None` for centered steps)
    At {
        index: usize,
        element: Option<ElementHandle>,
    },
    /// The step's target is missing and skipping is disabled
    Missing { index: usize, target: Target },
    /// Every remaining step in the direction of travel was skipped
    Exhausted { forward: bool },
}

/// Controller for one named tour.
///
/// The tour is the single source of truth for the current step: the
/// rendering adapter only ever draws what the tour pushes to it.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tourguide::core::TourStatus;
/// use tourguide::render::NoopAdapter;
/// use tourguide::step::StepDescriptor;
/// use tourguide::tour::Tour;
///
/// let mut tour = Tour::new("intro", Arc::new(NoopAdapter));
/// tour.add_step(StepDescriptor::new("Welcome")).unwrap();
/// tour.add_step(StepDescriptor::new("Search").with_target("#search")).unwrap();
///
/// tour.start().unwrap();
/// assert_eq!(tour.current_index(), Some(0));
///
/// tour.next().unwrap();
/// tour.next().unwrap();
/// assert_eq!(tour.status(), TourStatus::Finished);
/// ```
pub struct Tour {
    name: String,
    steps: StepRegistry,
    current: Option<usize>,
    status: TourStatus,
    options: TourOptions,
    callbacks: TourCallbacks,
    adapter: Arc<dyn RenderAdapter>,
    store: Option<Arc<dyn ProgressStore>>,
    pending_restore: Option<ProgressRecord>,
    history: TourHistory,
    run_id: Uuid,
}

impl Tour {
    /// Create a tour with no steps in `NotStarted`.
    pub fn new(name: impl Into<String>, adapter: Arc<dyn RenderAdapter>) -> Self {
        Self {
            name: name.into(),
            steps: StepRegistry::new(),
            current: None,
            status: TourStatus::NotStarted,
            options: TourOptions::default(),
            callbacks: TourCallbacks::new(),
            adapter,
            store: None,
            pending_restore: None,
            history: TourHistory::new(),
            run_id: Uuid::nil(),
        }
    }

    /// Replace the options. Unrecognised keys are logged and dropped.
    ///
    /// Turning `persist` on before the tour starts picks up progress saved
    /// by an earlier session, as if the option had been set at creation.
    pub fn set_options(&mut self, mut options: TourOptions) {
        for key in std::mem::take(&mut options.unrecognized).keys() {
            warn!(tour = %self.name, key = %key, "ignoring unrecognized tour option");
        }
        let enables_persist = options.persist && !self.options.persist;
        self.options = options;
        if enables_persist && self.status == TourStatus::NotStarted && self.pending_restore.is_none() {
            self.load_stored_progress();
        }
    }

    pub fn set_callbacks(&mut self, callbacks: TourCallbacks) {
        self.callbacks = callbacks;
    }

    /// Store used when `options.persist` is set.
    pub fn set_store(&mut self, store: Arc<dyn ProgressStore>) {
        self.store = Some(store);
    }

    /// Progress loaded from a store, applied by the next `start`.
    pub(crate) fn set_pending_restore(&mut self, record: ProgressRecord) {
        self.pending_restore = Some(record);
    }

    /// Pick up progress saved by an earlier session, if `persist` is set.
    ///
    /// A store that cannot be read is logged and treated as empty.
    pub(crate) fn load_stored_progress(&mut self) {
        if !self.options.persist {
            return;
        }
        let Some(store) = &self.store else {
            return;
        };
        match store.load(&self.name) {
            Ok(Some(record)) => {
                debug!(tour = %self.name, index = record.index, status = %record.status, "found stored progress");
                self.set_pending_restore(record);
            }
            Ok(None) => {}
            Err(e) => warn!(tour = %self.name, error = %e, "failed to load stored progress"),
        }
    }

    // --- queries ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TourStatus {
        self.status
    }

    /// `None` until the tour has started.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_step(&self) -> Option<&StepDescriptor> {
        self.current.and_then(|i| self.steps.get_step(i).ok())
    }

    pub fn steps(&self) -> &StepRegistry {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.size()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.status == TourStatus::Running
    }

    pub fn is_first(&self) -> bool {
        self.current == Some(0)
    }

    pub fn is_last(&self) -> bool {
        self.current.is_some() && self.current == self.steps.last_index()
    }

    pub fn options(&self) -> &TourOptions {
        &self.options
    }

    pub fn history(&self) -> &TourHistory {
        &self.history
    }

    /// Identifier of the current run, nil before the first start.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn pending_restore(&self) -> Option<&ProgressRecord> {
        self.pending_restore.as_ref()
    }

    /// Snapshot of the position in persisted form.
    pub fn progress(&self) -> ProgressRecord {
        ProgressRecord::new(self.current, self.status)
    }

    // --- setup ---

    /// Append a step. Only allowed before the tour starts.
    pub fn add_step(&mut self, mut descriptor: StepDescriptor) -> Result<usize, TourError> {
        if self.status != TourStatus::NotStarted {
            return Err(TourError::invalid(&self.name, Operation::AddStep, self.status));
        }
        for key in std::mem::take(&mut descriptor.params_mut().unrecognized).keys() {
            warn!(tour = %self.name, key = %key, "ignoring unrecognized step parameter");
        }
        self.steps
            .add_step(descriptor)
            .map_err(|e| TourError::from_registry(&self.name, Operation::AddStep, self.status, e))
    }

    // --- transitions ---

    pub fn start(&mut self) -> Result<(), TourError> {
        self.start_at(0)
    }

    /// Start the tour at `index`.
    ///
    /// Progress restored from a store takes precedence: a running or paused
    /// record resumes at its saved step, a finished or stopped record is
    /// restored as-is without showing anything.
    pub fn start_at(&mut self, index: usize) -> Result<(), TourError> {
        self.ensure(Operation::Start, &[TourStatus::NotStarted])?;
        if self.steps.is_empty() {
            return Err(TourError::EmptyTour {
                tour: self.name.clone(),
            });
        }

        // Stored progress is only consumed by a start that goes through.
        let mut index = index;
        if let Some(record) = self.pending_restore {
            match record.validate(self.steps.size()) {
                Err(e) => {
                    warn!(tour = %self.name, error = %e, "discarding stored progress");
                    self.pending_restore = None;
                }
                Ok(()) if record.status.is_final() => {
                    self.pending_restore = None;
                    self.run_id = Uuid::new_v4();
                    self.apply_record(record);
                    info!(tour = %self.name, status = %record.status, "tour already ended in an earlier session");
                    return Ok(());
                }
                Ok(()) => {
                    if let Some(saved) = record.current_index() {
                        info!(tour = %self.name, index = saved, "resuming stored progress");
                        index = saved;
                    }
                }
            }
        }

        if index >= self.steps.size() {
            return Err(TourError::IndexOutOfRange {
                index,
                len: self.steps.size(),
            });
        }

        let landing = self.land(None, index, true, Direction::Start)?;

        self.pending_restore = None;
        self.steps.seal();
        self.run_id = Uuid::new_v4();
        self.status = TourStatus::Running;
        self.current = match &landing {
            Landing::At { index, .. } | Landing::Missing { index, .. } => Some(*index),
            Landing::Exhausted { .. } => self.steps.last_index(),
        };
        info!(tour = %self.name, run = %self.run_id, index = ?self.current, "tour started");
        self.commit(Operation::Start, TourStatus::NotStarted, None);
        self.callbacks.started();

        match landing {
            Landing::Exhausted { .. } => self.complete(Operation::Start),
            other => self.display(other),
        }
    }

    /// Advance one step; completes the tour when called on the last step.
    pub fn next(&mut self) -> Result<(), TourError> {
        let current = self.active_index(Operation::Next, &[TourStatus::Running])?;
        if Some(current) == self.steps.last_index() {
            return self.complete(Operation::Next);
        }
        let landing = self.land(Some(current), current + 1, true, Direction::Next)?;
        self.move_to(Operation::Next, current, landing)
    }

    /// Go back one step. Ignored on the first step.
    pub fn previous(&mut self) -> Result<(), TourError> {
        let current = self.active_index(Operation::Previous, &[TourStatus::Running])?;
        if current == 0 {
            debug!(tour = %self.name, "already on the first step");
            return Ok(());
        }
        let landing = self.land(Some(current), current - 1, false, Direction::Previous)?;
        self.move_to(Operation::Previous, current, landing)
    }

    /// Jump directly to `index`.
    pub fn go_to(&mut self, index: usize) -> Result<(), TourError> {
        let current = self.active_index(Operation::GoTo, &[TourStatus::Running])?;
        if index >= self.steps.size() {
            return Err(TourError::IndexOutOfRange {
                index,
                len: self.steps.size(),
            });
        }
        if index == current {
            return self.redraw(Operation::GoTo);
        }
        let landing = self.land(Some(current), index, index > current, Direction::Jump)?;
        self.move_to(Operation::GoTo, current, landing)
    }

    /// Detach the view while keeping the position.
    pub fn pause(&mut self) -> Result<(), TourError> {
        let current = self.active_index(Operation::Pause, &[TourStatus::Running])?;
        self.status = TourStatus::Paused;
        info!(tour = %self.name, index = current, "tour paused");
        self.commit(Operation::Pause, TourStatus::Running, Some(current));
        self.adapter.hide_overlay();
        Ok(())
    }

    /// Re-attach the view and show the current step again.
    pub fn resume(&mut self) -> Result<(), TourError> {
        let current = self.active_index(Operation::Resume, &[TourStatus::Paused])?;
        self.status = TourStatus::Running;
        info!(tour = %self.name, index = current, "tour resumed");
        self.commit(Operation::Resume, TourStatus::Paused, Some(current));
        self.redraw(Operation::Resume)
    }

    /// Abandon the tour. A no-op when it never started or is already stopped.
    pub fn stop(&mut self) -> Result<(), TourError> {
        match self.status {
            TourStatus::NotStarted | TourStatus::Stopped => {
                debug!(tour = %self.name, status = %self.status, "stop ignored");
                Ok(())
            }
            TourStatus::Running | TourStatus::Paused => self.halt(Operation::Stop),
            TourStatus::Finished => Err(TourError::invalid(&self.name, Operation::Stop, self.status)),
        }
    }

    /// Let the user opt out: fires `on_skip`, then stops.
    pub fn skip(&mut self) -> Result<(), TourError> {
        let current = self.active_index(
            Operation::Skip,
            &[TourStatus::Running, TourStatus::Paused],
        )?;
        self.callbacks.skipped(current);
        self.halt(Operation::Skip)
    }

    /// Complete the tour from any step.
    pub fn finish(&mut self) -> Result<(), TourError> {
        self.ensure(Operation::Finish, &[TourStatus::Running])?;
        self.complete(Operation::Finish)
    }

    /// Bring a finished or stopped tour back to `NotStarted` so it can run
    /// again. Steps become editable again and the history restarts with the
    /// reset itself.
    pub fn reset(&mut self) -> Result<(), TourError> {
        match self.status {
            TourStatus::NotStarted => Ok(()),
            TourStatus::Finished | TourStatus::Stopped => {
                let (from_status, from_index) = (self.status, self.current);
                self.status = TourStatus::NotStarted;
                self.current = None;
                self.steps.unseal();
                self.history.clear();
                info!(tour = %self.name, "tour reset");
                self.commit(Operation::Reset, from_status, from_index);
                Ok(())
            }
            TourStatus::Running | TourStatus::Paused => {
                Err(TourError::invalid(&self.name, Operation::Reset, self.status))
            }
        }
    }

    /// Show the current step again, e.g. once a missing target has mounted.
    pub fn refresh(&mut self) -> Result<(), TourError> {
        self.ensure(Operation::Refresh, &[TourStatus::Running])?;
        self.redraw(Operation::Refresh)
    }

    /// Reconstruct the position from a persisted record.
    ///
    /// Only allowed before the tour starts. No lifecycle callbacks fire; a
    /// running record shows its step again.
    pub fn restore(&mut self, record: ProgressRecord) -> Result<(), TourError> {
        self.ensure(Operation::Restore, &[TourStatus::NotStarted])?;
        record.validate(self.steps.size())?;
        if record.status == TourStatus::NotStarted {
            return Ok(());
        }
        self.pending_restore = None;
        self.run_id = Uuid::new_v4();
        self.apply_record(record);
        info!(tour = %self.name, status = %self.status, index = ?self.current, "tour restored");
        if self.status == TourStatus::Running {
            self.redraw(Operation::Restore)
        } else {
            Ok(())
        }
    }

    // --- host lifecycle ---

    /// The host mounted the tour's view.
    pub fn attach(&mut self) -> Result<(), TourError> {
        match self.status {
            TourStatus::NotStarted if self.options.start_on_attach => self.start(),
            TourStatus::Paused => self.resume(),
            _ => Ok(()),
        }
    }

    /// The host unmounted the tour's view.
    pub fn detach(&mut self) -> Result<(), TourError> {
        match self.status {
            TourStatus::Running => self.pause(),
            _ => Ok(()),
        }
    }

    /// Handle a key press. Returns whether the key drove a transition.
    pub fn handle_key(&mut self, key: NavigationKey) -> Result<bool, TourError> {
        if !self.is_running() || !self.options.use_keyboard_navigation.is_enabled(key) {
            return Ok(false);
        }
        match key.action() {
            KeyAction::Next => self.next()?,
            KeyAction::Previous => self.previous()?,
            KeyAction::Stop => self.stop()?,
        }
        Ok(true)
    }

    // --- internals ---

    fn ensure(&self, operation: Operation, allowed: &[TourStatus]) -> Result<(), TourError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(TourError::invalid(&self.name, operation, self.status))
        }
    }

    fn active_index(&self, operation: Operation, allowed: &[TourStatus]) -> Result<usize, TourError> {
        self.ensure(operation, allowed)?;
        self.current
            .ok_or_else(|| TourError::invalid(&self.name, operation, self.status))
    }

    /// Resolve where a move towards `candidate` lands, skipping missing
    /// targets when configured. Evaluates the landing step's guard.
    fn land(
        &self,
        from: Option<usize>,
        candidate: usize,
        forward: bool,
        direction: Direction,
    ) -> Result<Landing, TourError> {
        let len = self.steps.size();
        let mut index = candidate;
        loop {
            let step = self.steps.get_step(index).map_err(|e| {
                TourError::from_registry(&self.name, operation_for(direction), self.status, e)
            })?;

            let landing = match step.target() {
                None => Landing::At {
                    index,
                    element: None,
                },
                Some(target) => match self.adapter.resolve_target(target) {
                    TargetResolution::Found(element) => Landing::At {
                        index,
                        element: Some(element),
                    },
                    TargetResolution::NotFound if self.options.skip_missing_targets => {
                        warn!(tour = %self.name, index, target = %target, "target not found, skipping step");
                        let following = if forward {
                            Some(index + 1).filter(|i| *i < len)
                        } else {
                            index.checked_sub(1)
                        };
                        match following {
                            Some(i) => {
                                index = i;
                                continue;
                            }
                            None => return Ok(Landing::Exhausted { forward }),
                        }
                    }
                    TargetResolution::NotFound => Landing::Missing {
                        index,
                        target: target.clone(),
                    },
                },
            };

            if let Some(guard) = step.guard() {
                let ctx = GuardContext {
                    tour: &self.name,
                    from,
                    to: index,
                    direction,
                };
                if !guard.check(&ctx) {
                    debug!(tour = %self.name, index, "step guard rejected entry");
                    return Err(TourError::GuardRejected {
                        tour: self.name.clone(),
                        index,
                    });
                }
            }
            return Ok(landing);
        }
    }

    fn move_to(&mut self, operation: Operation, from: usize, landing: Landing) -> Result<(), TourError> {
        let index = match &landing {
            Landing::At { index, .. } | Landing::Missing { index, .. } => *index,
            Landing::Exhausted { forward: true } => return self.complete(operation),
            Landing::Exhausted { forward: false } => {
                debug!(tour = %self.name, "no earlier step could be shown");
                return Ok(());
            }
        };
        self.current = Some(index);
        debug!(tour = %self.name, from, to = index, %operation, "step changed");
        self.commit(operation, self.status, Some(from));
        self.callbacks.step_changed(from, index);
        self.display(landing)
    }

    fn complete(&mut self, operation: Operation) -> Result<(), TourError> {
        let from_status = self.status;
        self.status = TourStatus::Finished;
        info!(tour = %self.name, run = %self.run_id, "tour completed");
        self.commit(operation, from_status, self.current);
        self.callbacks.completed();
        self.adapter.hide_overlay();
        Ok(())
    }

    fn halt(&mut self, operation: Operation) -> Result<(), TourError> {
        let from_status = self.status;
        self.status = TourStatus::Stopped;
        info!(tour = %self.name, run = %self.run_id, index = ?self.current, %operation, "tour stopped");
        self.commit(operation, from_status, self.current);
        self.callbacks.stopped();
        self.adapter.hide_overlay();
        Ok(())
    }

    fn apply_record(&mut self, record: ProgressRecord) {
        self.steps.seal();
        self.status = record.status;
        self.current = record.current_index();
        self.commit(Operation::Restore, TourStatus::NotStarted, None);
    }

    fn commit(&mut self, operation: Operation, from_status: TourStatus, from_index: Option<usize>) {
        self.history.push(
            TransitionRecord {
                operation,
                from_status,
                to_status: self.status,
                from_index,
                to_index: self.current,
                run_id: self.run_id,
                timestamp: Utc::now(),
            },
            HISTORY_LIMIT,
        );
        self.checkpoint();
    }

    fn checkpoint(&self) {
        if !self.options.persist {
            return;
        }
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.name, &self.progress()) {
            warn!(tour = %self.name, error = %e, "failed to persist tour progress");
        }
    }

    fn display(&self, landing: Landing) -> Result<(), TourError> {
        match landing {
            Landing::At { index, element } => self.show(index, element),
            Landing::Missing { index, target } => Err(TourError::TargetNotFound {
                tour: self.name.clone(),
                index,
                target,
            }),
            Landing::Exhausted { .. } => Ok(()),
        }
    }

    /// Show the current step again. With skipping enabled, a step whose
    /// target has gone missing moves on the way `next` would.
    fn redraw(&mut self, operation: Operation) -> Result<(), TourError> {
        let Some(current) = self.current else {
            return Ok(());
        };
        match self.render_current() {
            Err(TourError::TargetNotFound { .. }) if self.options.skip_missing_targets => {
                let landing = self.land(Some(current), current, true, Direction::Jump)?;
                if matches!(landing, Landing::At { index, .. } if index == current) {
                    self.display(landing)
                } else {
                    self.move_to(operation, current, landing)
                }
            }
            other => other,
        }
    }

    fn render_current(&self) -> Result<(), TourError> {
        let Some(index) = self.current else {
            return Ok(());
        };
        let step = self.steps.get_step(index).map_err(|e| {
            TourError::from_registry(&self.name, Operation::Refresh, self.status, e)
        })?;
        let element = match step.target() {
            None => None,
            Some(target) => match self.adapter.resolve_target(target) {
                TargetResolution::Found(element) => Some(element),
                TargetResolution::NotFound => {
                    return Err(TourError::TargetNotFound {
                        tour: self.name.clone(),
                        index,
                        target: target.clone(),
                    })
                }
            },
        };
        self.show(index, element)
    }

    fn show(&self, index: usize, element: Option<ElementHandle>) -> Result<(), TourError> {
        let step = self.steps.get_step(index).map_err(|e| {
            TourError::from_registry(&self.name, Operation::Refresh, self.status, e)
        })?;
        let view = self.view(index, step);
        self.adapter
            .show_step(&view, element)
            .map_err(|source| TourError::RenderFailure {
                tour: self.name.clone(),
                index,
                source,
            })
    }

    fn view<'a>(&'a self, index: usize, step: &'a StepDescriptor) -> StepView<'a> {
        let total = self.steps.size();
        let is_first = index == 0;
        let is_last = index + 1 == total;
        let params = step.params();
        let enabled = params.enabled_buttons.unwrap_or(self.options.enabled_buttons);
        StepView {
            tour: &self.name,
            index,
            total,
            step,
            placement: params.placement,
            highlight: params.highlight.unwrap_or(self.options.highlight),
            buttons: ButtonState {
                skip: enabled.skip && !is_last,
                previous: enabled.previous && !is_first,
                next: enabled.next && !is_last,
                stop: enabled.stop && is_last,
            },
            labels: &self.options.labels,
        }
    }
}

fn operation_for(direction: Direction) -> Operation {
    match direction {
        Direction::Start => Operation::Start,
        Direction::Next => Operation::Next,
        Direction::Previous => Operation::Previous,
        Direction::Jump => Operation::GoTo,
    }
}

impl fmt::Debug for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("current", &self.current)
            .field("steps", &self.steps.size())
            .field("options", &self.options)
            .finish()
    }
}
