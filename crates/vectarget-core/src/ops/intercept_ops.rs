//! Order interception
//!
//! Every order the host issues passes through `intercept_order`, which
//! decides whether the host may execute it, whether its point must be
//! rewritten, and which notifications the presentation tier receives.
//!
//! A two-phase pick spans two cast-position orders from the same session:
//! the first is suppressed and remembered, the second completes the pick,
//! is queued under its sequence number and is let through with its
//! position replaced by the capability's point of cast.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use vectarget_core_types::{ActorId, CapabilityId};

use crate::errors::VectorTargetError;
use crate::model::{point_of_cast, Command, PendingSelection, Position, VectorCapability};
use crate::notify::{Notification, SelectionKey};
use crate::state::Coordinator;
use crate::{log_op_end, log_op_start};

/// What the host must do with an intercepted order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Drop the order; it was the first point of a pick
    Suppress,
    /// Execute the order unchanged
    Allow,
    /// Execute the order at `position` with the given shift-queue flag
    AllowRewritten { position: Position, queue: bool },
}

impl Decision {
    /// Accept/reject boolean in the host's order-filter protocol
    pub fn accepts(&self) -> bool {
        !matches!(self, Decision::Suppress)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Decision::Suppress => "suppress",
            Decision::Allow => "allow",
            Decision::AllowRewritten { .. } => "allow_rewritten",
        }
    }
}

/// Decision plus the notifications emitted while reaching it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptOutcome {
    #[serde(flatten)]
    pub decision: Decision,
    pub notifications: Vec<Notification>,
}

impl InterceptOutcome {
    fn new(decision: Decision) -> Self {
        Self {
            decision,
            notifications: Vec::new(),
        }
    }
}

/// Run one host order through the interception protocol
///
/// `capability` is the host's view of `command.capability_id`, if the order
/// casts one. The coordinator is updated in place; each call is a single
/// state transition.
///
/// The steps, in order:
/// 1. Drop target actors whose queues already hold `command.sequence` or
///    later. If none remain the order is a host re-delivery: `Allow`.
/// 2. Orders that are not cast-position orders of a two-phase capability
///    take the ordinary path (step 4).
/// 3. Without a pending pick for this session and pair, the order's point
///    starts a pick (`Suppress`). Otherwise it completes the pick
///    (`AllowRewritten`).
/// 4. Ordinary orders clear queues unless shift-queued, cancel any pending
///    pick of the session, and are allowed unchanged.
pub fn intercept_order(
    coord: &mut Coordinator,
    command: &Command,
    capability: Option<&dyn VectorCapability>,
) -> InterceptOutcome {
    let started = Instant::now();
    log_op_start!(
        "intercept_order",
        session_id = command.session_id.get(),
        sequence = command.sequence,
        queue = command.queue
    );

    let outcome = decide(coord, command, capability);

    log_op_end!(
        "intercept_order",
        duration_ms = started.elapsed().as_millis() as u64,
        session_id = command.session_id.get(),
        sequence = command.sequence,
        decision = outcome.decision.name(),
        notifications = outcome.notifications.len()
    );
    outcome
}

fn decide(
    coord: &mut Coordinator,
    command: &Command,
    capability: Option<&dyn VectorCapability>,
) -> InterceptOutcome {
    let live_actors = live_actors(coord, command);
    if live_actors.is_empty() {
        tracing::debug!(
            session_id = command.session_id.get(),
            sequence = command.sequence,
            "stale order re-delivered; passing through"
        );
        return InterceptOutcome::new(Decision::Allow);
    }

    match (command.capability_id, capability) {
        (Some(capability_id), Some(capability))
            if capability.is_two_phase_enabled() && command.kind.is_cast_position() =>
        {
            two_phase_order(coord, command, capability_id, capability, &live_actors)
        }
        _ => ordinary_order(coord, command, &live_actors),
    }
}

/// Target actors for which `command` is newer than anything queued
fn live_actors(coord: &Coordinator, command: &Command) -> Vec<ActorId> {
    command
        .actor_ids
        .iter()
        .copied()
        .filter(|actor_id| command.sequence > coord.queues.max_outstanding_sequence(*actor_id))
        .collect()
}

fn two_phase_order(
    coord: &mut Coordinator,
    command: &Command,
    capability_id: CapabilityId,
    capability: &dyn VectorCapability,
    live_actors: &[ActorId],
) -> InterceptOutcome {
    // The casting actor is the first live target; a capability belongs to one actor
    let actor_id = live_actors[0];

    let pending = coord
        .pending
        .get(command.session_id)
        .filter(|p| p.targets(actor_id, capability_id))
        .cloned();

    match pending {
        None => start_selection(coord, command, actor_id, capability_id, capability),
        Some(pending) => finish_selection(coord, command, pending, capability, live_actors),
    }
}

fn start_selection(
    coord: &mut Coordinator,
    command: &Command,
    actor_id: ActorId,
    capability_id: CapabilityId,
    capability: &dyn VectorCapability,
) -> InterceptOutcome {
    let mut outcome = InterceptOutcome::new(Decision::Suppress);

    let selection = PendingSelection {
        capability_id,
        actor_id,
        first_point: command.position,
        queue: command.queue,
        distance_bounds: capability.distance_bounds(),
        presentation: capability.presentation_parameters().clone(),
        sequence: command.sequence,
    };

    // A pick for another pair from the same session is superseded
    if let Some(replaced) = coord.pending.set(command.session_id, selection.clone()) {
        tracing::debug!(
            session_id = command.session_id.get(),
            replaced_sequence = replaced.sequence,
            "pending pick superseded by a new first point"
        );
        outcome.notifications.push(Notification::SelectionCancelled {
            key: pending_key(command, &replaced),
        });
    }

    outcome.notifications.push(Notification::SelectionStarted {
        key: pending_key(command, &selection),
        first_point: selection.first_point,
        presentation: selection.presentation,
    });
    outcome
}

fn finish_selection(
    coord: &mut Coordinator,
    command: &Command,
    pending: PendingSelection,
    capability: &dyn VectorCapability,
    live_actors: &[ActorId],
) -> InterceptOutcome {
    // A shift-queued first click makes the whole gesture shift-queued
    let queue = pending.queue || command.queue;
    if !queue {
        let dropped = coord.queues.clear_queues_for_actors(live_actors);
        if dropped > 0 {
            tracing::debug!(dropped, "replacing queued picks");
        }
    }

    let position = point_of_cast(
        capability.point_of_cast_mode(),
        pending.first_point,
        command.position,
    );

    let key = SelectionKey {
        session_id: command.session_id,
        actor_id: pending.actor_id,
        capability_id: pending.capability_id,
        sequence: command.sequence,
    };
    let (actor_id, capability_id) = (pending.actor_id, pending.capability_id);

    coord.pending.clear(command.session_id);
    let entry = pending.complete(command.position);

    let notification = match coord
        .queues
        .queue_for(actor_id, capability_id)
        .push(entry, Some(command.sequence))
    {
        Ok(_) => Notification::SelectionFinished { key },
        Err(VectorTargetError::QueueOverflow { capacity }) => {
            tracing::warn!(
                actor_id = actor_id.get(),
                capability_id = capability_id.get(),
                sequence = command.sequence,
                capacity,
                "queue full; pick not queued"
            );
            Notification::QueueFull { key }
        }
        Err(err) => {
            tracing::error!(
                actor_id = actor_id.get(),
                capability_id = capability_id.get(),
                sequence = command.sequence,
                error = %err,
                "pick could not be queued"
            );
            Notification::QueueFull { key }
        }
    };

    InterceptOutcome {
        decision: Decision::AllowRewritten { position, queue },
        notifications: vec![notification],
    }
}

fn ordinary_order(
    coord: &mut Coordinator,
    command: &Command,
    live_actors: &[ActorId],
) -> InterceptOutcome {
    let mut outcome = InterceptOutcome::new(Decision::Allow);

    if !command.queue {
        coord.queues.clear_queues_for_actors(live_actors);
    }

    if let Some(cancelled) = coord.pending.clear(command.session_id) {
        tracing::debug!(
            session_id = command.session_id.get(),
            cancelled_sequence = cancelled.sequence,
            "unrelated order cancels pending pick"
        );
        outcome.notifications.push(Notification::SelectionCancelled {
            key: pending_key(command, &cancelled),
        });
    }
    outcome
}

fn pending_key(command: &Command, pending: &PendingSelection) -> SelectionKey {
    SelectionKey {
        session_id: command.session_id,
        actor_id: pending.actor_id,
        capability_id: pending.capability_id,
        sequence: pending.sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CapabilityConfig, OrderKind, PointOfCastMode};
    use vectarget_core_types::SessionId;

    const S: SessionId = SessionId::new(0);
    const A: ActorId = ActorId::new(100);
    const C: CapabilityId = CapabilityId::new(7);

    fn cast(seq: i64, x: f32) -> Command {
        Command::cast_position(S, A, C, seq, Position::new(x, 0.0, 0.0))
    }

    #[test]
    fn test_first_point_is_suppressed_and_remembered() {
        let mut coord = Coordinator::new(4);
        let cap = CapabilityConfig::two_phase(C, PointOfCastMode::Midpoint);

        let outcome = intercept_order(&mut coord, &cast(10, 0.0), Some(&cap));

        assert_eq!(outcome.decision, Decision::Suppress);
        assert!(!outcome.decision.accepts());
        assert_eq!(coord.pending.get(S).unwrap().sequence, 10);
        assert_eq!(coord.queues.queued_len(A, C), 0);
    }

    #[test]
    fn test_second_point_rewrites_and_queues() {
        let mut coord = Coordinator::new(4);
        let cap = CapabilityConfig::two_phase(C, PointOfCastMode::Midpoint);

        intercept_order(&mut coord, &cast(10, 0.0), Some(&cap));
        let outcome = intercept_order(&mut coord, &cast(10, 10.0), Some(&cap));

        assert_eq!(
            outcome.decision,
            Decision::AllowRewritten {
                position: Position::new(5.0, 0.0, 0.0),
                queue: false
            }
        );
        assert!(coord.pending.get(S).is_none());
        assert_eq!(coord.queues.queued_len(A, C), 1);
    }

    #[test]
    fn test_single_point_capability_is_ordinary() {
        let mut coord = Coordinator::new(4);
        let cap = CapabilityConfig::single_point(C);

        let outcome = intercept_order(&mut coord, &cast(3, 1.0), Some(&cap));

        assert_eq!(outcome.decision, Decision::Allow);
        assert!(outcome.notifications.is_empty());
        assert!(coord.pending.is_empty());
    }

    #[test]
    fn test_order_without_actors_is_allowed() {
        let mut coord = Coordinator::new(4);
        let cmd = Command::plain(S, Vec::new(), OrderKind::Stop, 1);
        let outcome = intercept_order(&mut coord, &cmd, None);
        assert_eq!(outcome.decision, Decision::Allow);
    }

    #[test]
    fn test_decision_names() {
        assert_eq!(Decision::Suppress.name(), "suppress");
        assert!(Decision::Allow.accepts());
        assert!(Decision::AllowRewritten {
            position: Position::ZERO,
            queue: true
        }
        .accepts());
    }
}
