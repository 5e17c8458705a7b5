//! Property-based tests for the tour state machine.
//!
//! These tests use proptest to drive tours through random operation
//! sequences and compare every step against a small reference model.

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tourguide::core::TourStatus;
use tourguide::persist::ProgressRecord;
use tourguide::render::{
    ElementHandle, NoopAdapter, RenderAdapter, RenderFailure, StepView, TargetResolution,
};
use tourguide::step::{StepDescriptor, Target};
use tourguide::tour::{Tour, TourCallbacks, TourError, TourOptions};

#[derive(Clone, Copy, Debug)]
enum Op {
    Start,
    Next,
    Previous,
    GoTo(usize),
    Pause,
    Resume,
    Stop,
    Skip,
    Finish,
    Reset,
}

prop_compose! {
    fn arbitrary_op()(variant in 0..10u8, target in 0..8usize) -> Op {
        match variant {
            0 => Op::Start,
            1 => Op::Next,
            2 => Op::Previous,
            3 => Op::GoTo(target),
            4 => Op::Pause,
            5 => Op::Resume,
            6 => Op::Stop,
            7 => Op::Skip,
            8 => Op::Finish,
            _ => Op::Reset,
        }
    }
}

/// Expected `(status, index)` after `op`, or `None` if `op` must fail.
fn model(
    status: TourStatus,
    index: Option<usize>,
    len: usize,
    op: Op,
) -> Option<(TourStatus, Option<usize>)> {
    use TourStatus::*;
    match (op, status, index) {
        (Op::Start, NotStarted, _) => Some((Running, Some(0))),
        (Op::Next, Running, Some(i)) if i + 1 == len => Some((Finished, Some(i))),
        (Op::Next, Running, Some(i)) => Some((Running, Some(i + 1))),
        (Op::Previous, Running, Some(i)) => Some((Running, Some(i.saturating_sub(1)))),
        (Op::GoTo(t), Running, Some(_)) if t < len => Some((Running, Some(t))),
        (Op::Pause, Running, i) => Some((Paused, i)),
        (Op::Resume, Paused, i) => Some((Running, i)),
        (Op::Stop, NotStarted | Stopped, i) => Some((status, i)),
        (Op::Stop | Op::Skip, Running | Paused, i) => Some((Stopped, i)),
        (Op::Finish, Running, i) => Some((Finished, i)),
        (Op::Reset, NotStarted, i) => Some((NotStarted, i)),
        (Op::Reset, Finished | Stopped, _) => Some((NotStarted, None)),
        _ => None,
    }
}

fn apply(tour: &mut Tour, op: Op) -> Result<(), TourError> {
    match op {
        Op::Start => tour.start(),
        Op::Next => tour.next(),
        Op::Previous => tour.previous(),
        Op::GoTo(index) => tour.go_to(index),
        Op::Pause => tour.pause(),
        Op::Resume => tour.resume(),
        Op::Stop => tour.stop(),
        Op::Skip => tour.skip(),
        Op::Finish => tour.finish(),
        Op::Reset => tour.reset(),
    }
}

fn tour(len: usize) -> Tour {
    let mut tour = Tour::new("prop", Arc::new(NoopAdapter));
    for i in 0..len {
        tour.add_step(StepDescriptor::new(format!("step {}", i)))
            .unwrap();
    }
    tour
}

/// Adapter whose targets `#0`, `#1`, ... are mounted per a fixed mask.
struct Mounted(Vec<bool>);

impl Mounted {
    fn has(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }
}

impl RenderAdapter for Mounted {
    fn resolve_target(&self, target: &Target) -> TargetResolution {
        let index = target.selector().trim_start_matches('#').parse::<usize>();
        match index {
            Ok(i) if self.has(i) => TargetResolution::Found(ElementHandle::new(i as u64)),
            _ => TargetResolution::NotFound,
        }
    }

    fn show_step(
        &self,
        _view: &StepView<'_>,
        _element: Option<ElementHandle>,
    ) -> Result<(), RenderFailure> {
        Ok(())
    }

    fn hide_overlay(&self) {}
}

fn skipping_tour(mounted: Vec<bool>) -> Tour {
    let len = mounted.len();
    let mut tour = Tour::new("prop", Arc::new(Mounted(mounted)));
    tour.set_options(TourOptions::default().skip_missing_targets(true));
    for i in 0..len {
        tour.add_step(StepDescriptor::new(format!("step {}", i)).with_target(format!("#{}", i)))
            .unwrap();
    }
    tour
}

proptest! {
    #[test]
    fn skipping_only_rests_on_mounted_steps(
        mounted in prop::collection::vec(any::<bool>(), 1..6),
        ops in prop::collection::vec(arbitrary_op(), 0..40),
    ) {
        let len = mounted.len();
        let adapter = Mounted(mounted.clone());
        let mut tour = skipping_tour(mounted);

        for op in ops {
            let before = (tour.status(), tour.current_index());
            let result = apply(&mut tour, op);
            if let Err(e) = &result {
                prop_assert!(
                    matches!(e, TourError::InvalidState { .. } | TourError::IndexOutOfRange { .. }),
                    "{:?} from {:?} failed with {:?}",
                    op,
                    before,
                    e
                );
            }

            match tour.status() {
                TourStatus::NotStarted => prop_assert_eq!(tour.current_index(), None),
                TourStatus::Running => {
                    let index = tour.current_index();
                    prop_assert!(index.is_some_and(|i| i < len && adapter.has(i)));
                }
                TourStatus::Paused | TourStatus::Finished | TourStatus::Stopped => {
                    prop_assert!(tour.current_index().is_some_and(|i| i < len));
                }
            }
        }
    }

    #[test]
    fn start_with_nothing_mounted_completes(len in 1..6usize) {
        let mut tour = skipping_tour(vec![false; len]);

        tour.start().unwrap();

        prop_assert_eq!(tour.status(), TourStatus::Finished);
        prop_assert_eq!(tour.current_index(), Some(len - 1));
    }

    #[test]
    fn tour_follows_reference_model(
        len in 1..6usize,
        ops in prop::collection::vec(arbitrary_op(), 0..40),
    ) {
        let mut tour = tour(len);

        for op in ops {
            let before = (tour.status(), tour.current_index());
            let expected = model(before.0, before.1, len, op);
            let result = apply(&mut tour, op);

            match expected {
                Some(after) => {
                    prop_assert!(result.is_ok(), "{:?} from {:?} failed: {:?}", op, before, result);
                    prop_assert_eq!((tour.status(), tour.current_index()), after);
                }
                None => {
                    prop_assert!(result.is_err(), "{:?} from {:?} should fail", op, before);
                    prop_assert_eq!((tour.status(), tour.current_index()), before);
                }
            }
        }
    }

    #[test]
    fn index_stays_in_bounds_while_active(
        len in 1..6usize,
        ops in prop::collection::vec(arbitrary_op(), 0..40),
    ) {
        let mut tour = tour(len);

        for op in ops {
            let _ = apply(&mut tour, op);
            match tour.status() {
                TourStatus::NotStarted => prop_assert_eq!(tour.current_index(), None),
                TourStatus::Running | TourStatus::Paused => {
                    let index = tour.current_index();
                    prop_assert!(index.is_some_and(|i| i < len));
                }
                TourStatus::Finished | TourStatus::Stopped => {
                    prop_assert!(tour.current_index().map_or(true, |i| i < len));
                }
            }
        }
    }

    #[test]
    fn failed_operations_are_rejected_as_invalid_or_out_of_range(
        len in 1..6usize,
        ops in prop::collection::vec(arbitrary_op(), 0..40),
    ) {
        let mut tour = tour(len);

        for op in ops {
            if let Err(e) = apply(&mut tour, op) {
                prop_assert!(
                    matches!(e, TourError::InvalidState { .. } | TourError::IndexOutOfRange { .. }),
                    "unexpected error {:?}",
                    e
                );
            }
        }
    }

    #[test]
    fn walking_forward_completes_after_len_nexts(len in 1..10usize) {
        let completed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completed);
        let mut tour = tour(len);
        tour.set_callbacks(TourCallbacks::new().on_complete(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tour.start().unwrap();
        for expected in 1..len {
            tour.next().unwrap();
            prop_assert_eq!(tour.status(), TourStatus::Running);
            prop_assert_eq!(tour.current_index(), Some(expected));
        }
        tour.next().unwrap();

        prop_assert_eq!(tour.status(), TourStatus::Finished);
        prop_assert_eq!(completed.load(Ordering::SeqCst), 1);
        prop_assert!(tour.next().unwrap_err().is_invalid_state());
        prop_assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_is_idempotent(len in 1..6usize, steps in 0..6usize, repeats in 1..4usize) {
        let stopped = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&stopped);
        let mut tour = tour(len);
        tour.set_callbacks(TourCallbacks::new().on_stop(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tour.start().unwrap();
        let _ = tour.go_to(steps.min(len - 1));
        let index = tour.current_index();

        for _ in 0..repeats {
            tour.stop().unwrap();
        }

        prop_assert_eq!(tour.status(), TourStatus::Stopped);
        prop_assert_eq!(tour.current_index(), index);
        prop_assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn previous_on_first_step_changes_nothing(len in 1..6usize, presses in 1..5usize) {
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        let mut tour = tour(len);
        tour.set_callbacks(TourCallbacks::new().on_step_change(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tour.start().unwrap();
        for _ in 0..presses {
            tour.previous().unwrap();
        }

        prop_assert_eq!(tour.current_index(), Some(0));
        prop_assert_eq!(tour.status(), TourStatus::Running);
        prop_assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn progress_restores_the_same_position(
        len in 1..6usize,
        ops in prop::collection::vec(arbitrary_op(), 0..20),
    ) {
        let mut original = tour(len);
        for op in ops {
            let _ = apply(&mut original, op);
        }
        let record = original.progress();
        let decoded = ProgressRecord::from_json(&record.to_json().unwrap()).unwrap();

        let mut restored = tour(len);
        restored.restore(decoded).unwrap();

        prop_assert_eq!(restored.status(), original.status());
        match original.status() {
            TourStatus::NotStarted => prop_assert_eq!(restored.current_index(), None),
            _ => prop_assert_eq!(restored.current_index(), original.current_index()),
        }
    }
}
