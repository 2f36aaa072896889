#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{cast, catalog, move_order, point, ACTOR, CAP, SESSION};
use proptest::prelude::*;
use vectarget_core::model::{point_of_cast, PointOfCastMode, QueueEntry};
use vectarget_core::ops::{dispatch_start, intercept_order};
use vectarget_core::state::SparseSequenceQueue;
use vectarget_core::{
    apply, CapabilityResolver, Coordinator, Decision, EventOutcome, HostEvent, Notification,
    Position,
};

fn coordinate() -> impl Strategy<Value = f32> {
    -10_000.0f32..10_000.0
}

fn position() -> impl Strategy<Value = Position> {
    (coordinate(), coordinate(), coordinate()).prop_map(|(x, y, z)| Position::new(x, y, z))
}

fn mode() -> impl Strategy<Value = PointOfCastMode> {
    prop_oneof![
        Just(PointOfCastMode::Initial),
        Just(PointOfCastMode::Terminal),
        Just(PointOfCastMode::Midpoint),
    ]
}

fn entry(x: f32) -> QueueEntry {
    QueueEntry {
        first_point: point(x, 0.0),
        second_point: point(x, 1.0),
        distance_bounds: Default::default(),
        presentation: Default::default(),
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Cast { queued: bool },
    Move { queued: bool },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => any::<bool>().prop_map(|queued| Step::Cast { queued }),
        1 => any::<bool>().prop_map(|queued| Step::Move { queued }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    /// Only a cast that follows a pending first point completes a pick
    #[test]
    fn pairing_completes_exactly_one_entry_per_pair(steps in prop::collection::vec(step(), 1..40)) {
        let catalog = catalog(PointOfCastMode::Midpoint);
        let mut coord = Coordinator::new(1024);
        let mut model_pending = false;
        let mut model_completed = 0usize;
        let mut finished = 0usize;

        for (i, step) in steps.iter().enumerate() {
            let seq = i as i64 + 1;
            let cmd = match step {
                Step::Cast { queued } => cast(seq, point(seq as f32, 0.0)).queued(*queued),
                Step::Move { queued } => move_order(seq).queued(*queued),
            };
            let outcome = match apply(&mut coord, HostEvent::Order(cmd), &catalog).unwrap() {
                EventOutcome::Order(outcome) => outcome,
                other => panic!("Wrong outcome: {:?}", other),
            };
            finished += outcome
                .notifications
                .iter()
                .filter(|n| matches!(n, Notification::SelectionFinished { .. }))
                .count();

            match (step, model_pending) {
                (Step::Cast { .. }, false) => {
                    prop_assert_eq!(outcome.decision, Decision::Suppress);
                    model_pending = true;
                }
                (Step::Cast { .. }, true) => {
                    let rewritten = matches!(outcome.decision, Decision::AllowRewritten { .. });
                    prop_assert!(rewritten);
                    model_pending = false;
                    model_completed += 1;
                }
                (Step::Move { .. }, _) => {
                    prop_assert_eq!(outcome.decision, Decision::Allow);
                    model_pending = false;
                }
            }
            prop_assert_eq!(coord.pending().get(SESSION).is_some(), model_pending);
        }

        prop_assert_eq!(finished, model_completed);
    }

    /// Dispatch order is push order, whatever the gaps between sequences
    #[test]
    fn dispatch_is_fifo_with_gaps(gaps in prop::collection::vec(1i64..50, 1..20)) {
        let mut coord = Coordinator::new(32);
        let mut seq = 0i64;
        for (i, gap) in gaps.iter().enumerate() {
            seq += gap;
            coord
                .queues_mut()
                .queue_for(ACTOR, CAP)
                .push(entry(i as f32), Some(seq))
                .unwrap();
        }

        for i in 0..gaps.len() {
            let target = dispatch_start(&mut coord, ACTOR, CAP).unwrap();
            prop_assert_eq!(target.first.x, i as f32);
        }
        prop_assert!(dispatch_start(&mut coord, ACTOR, CAP).is_err());
    }

    /// Implicit sequences continue from `last` and popping from both ends keeps order
    #[test]
    fn sparse_queue_pops_from_both_ends(gaps in prop::collection::vec(1i64..10, 2..16)) {
        let mut queue = SparseSequenceQueue::new(64);
        let mut expected = Vec::new();
        let mut seq = 0i64;
        for gap in &gaps {
            seq += gap;
            queue.push(seq, Some(seq)).unwrap();
            expected.push(seq);
        }
        let implicit = queue.push(-1, None).unwrap();
        prop_assert_eq!(implicit, seq + 1);
        expected.push(seq + 1);

        let (back_seq, _) = queue.pop_back().unwrap();
        prop_assert_eq!(back_seq, seq + 1);
        expected.pop();

        let mut popped = Vec::new();
        while let Ok((s, _)) = queue.pop_front() {
            popped.push(s);
        }
        prop_assert_eq!(popped, expected);
        prop_assert!(queue.first() > queue.last());
    }

    /// The rewrite is a pure function and the midpoint is symmetric
    #[test]
    fn point_of_cast_is_pure_and_midpoint_symmetric(
        mode in mode(),
        a in position(),
        b in position(),
    ) {
        prop_assert_eq!(point_of_cast(mode, a, b), point_of_cast(mode, a, b));
        prop_assert_eq!(
            point_of_cast(PointOfCastMode::Midpoint, a, b),
            point_of_cast(PointOfCastMode::Midpoint, b, a)
        );
    }

    /// Orders at or below an actor's newest queued sequence change nothing
    #[test]
    fn stale_orders_are_ignored(
        newest in 1i64..1_000,
        offset in 0i64..1_000,
        is_cast in any::<bool>(),
        queued in any::<bool>(),
    ) {
        let catalog = catalog(PointOfCastMode::Terminal);
        let mut coord = Coordinator::new(8);
        coord
            .queues_mut()
            .queue_for(ACTOR, CAP)
            .push(entry(0.0), Some(newest))
            .unwrap();

        let seq = newest - (offset % newest);
        let cmd = if is_cast {
            cast(seq, point(1.0, 1.0)).queued(queued)
        } else {
            move_order(seq).queued(queued)
        };
        let outcome = intercept_order(&mut coord, &cmd, catalog.resolve(CAP));

        prop_assert_eq!(outcome.decision, Decision::Allow);
        prop_assert!(outcome.notifications.is_empty());
        prop_assert!(coord.pending().is_empty());
        prop_assert_eq!(coord.queues().queued_len(ACTOR, CAP), 1);
        prop_assert_eq!(coord.queues().max_outstanding_sequence(ACTOR), newest);
    }
}
