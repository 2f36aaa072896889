use std::time::Instant;

use vectarget_core_types::{ActorId, CapabilityId};

use crate::errors::{Result, VectorTargetError};
use crate::model::{VectorTarget, VectorTargetReceiver};
use crate::state::Coordinator;
use crate::{log_op_end, log_op_error, log_op_start};

/// Hand out the next queued pick when the host starts a queued action
///
/// The host's dispatch signal names only the actor and capability, so the
/// oldest entry of that pair's queue is, by construction, the pick the
/// action was issued for.
///
/// # Errors
///
/// * `EmptyQueue` - nothing is queued for the pair. Interception and
///   dispatch have drifted apart; the caller must treat this as fatal.
pub fn dispatch_start(
    coord: &mut Coordinator,
    actor_id: ActorId,
    capability_id: CapabilityId,
) -> Result<VectorTarget> {
    let started = Instant::now();
    log_op_start!(
        "dispatch_start",
        actor_id = actor_id.get(),
        capability_id = capability_id.get()
    );

    let popped = coord
        .queues
        .get_mut(actor_id, capability_id)
        .and_then(|queue| queue.pop_front().ok())
        .ok_or(VectorTargetError::EmptyQueue {
            actor_id,
            capability_id,
        });

    match popped {
        Ok((sequence, entry)) => {
            log_op_end!(
                "dispatch_start",
                duration_ms = started.elapsed().as_millis() as u64,
                actor_id = actor_id.get(),
                capability_id = capability_id.get(),
                sequence = sequence
            );
            Ok(entry.vector_target())
        }
        Err(err) => {
            log_op_error!(
                "dispatch_start",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64,
                actor_id = actor_id.get(),
                capability_id = capability_id.get()
            );
            Err(err)
        }
    }
}

/// `dispatch_start`, then hand the points to the capability
///
/// # Errors
///
/// * `EmptyQueue` - see [`dispatch_start`]; the receiver is not called.
pub fn dispatch_into(
    coord: &mut Coordinator,
    actor_id: ActorId,
    capability_id: CapabilityId,
    receiver: &mut dyn VectorTargetReceiver,
) -> Result<VectorTarget> {
    let target = dispatch_start(coord, actor_id, capability_id)?;
    receiver.receive_vector_target(target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DistanceBounds, Position, PresentationParameters, QueueEntry};

    const A: ActorId = ActorId::new(1);
    const C: CapabilityId = CapabilityId::new(2);

    fn entry(x: f32) -> QueueEntry {
        QueueEntry {
            first_point: Position::ZERO,
            second_point: Position::new(x, 0.0, 0.0),
            distance_bounds: DistanceBounds::default(),
            presentation: PresentationParameters::new(),
        }
    }

    #[test]
    fn test_dispatch_pops_oldest() {
        let mut coord = Coordinator::new(4);
        coord.queues_mut().queue_for(A, C).push(entry(1.0), Some(3)).unwrap();
        coord.queues_mut().queue_for(A, C).push(entry(2.0), Some(8)).unwrap();

        let target = dispatch_start(&mut coord, A, C).unwrap();
        assert_eq!(target.second, Position::new(1.0, 0.0, 0.0));
        assert_eq!(coord.queues().queued_len(A, C), 1);
    }

    #[test]
    fn test_dispatch_on_empty_queue_is_error() {
        let mut coord = Coordinator::new(4);
        let err = dispatch_start(&mut coord, A, C).unwrap_err();
        assert_eq!(
            err,
            VectorTargetError::EmptyQueue {
                actor_id: A,
                capability_id: C
            }
        );
    }

    #[test]
    fn test_dispatch_into_feeds_receiver() {
        let mut coord = Coordinator::new(4);
        coord.queues_mut().queue_for(A, C).push(entry(4.0), Some(1)).unwrap();

        let mut slot: Option<VectorTarget> = None;
        dispatch_into(&mut coord, A, C, &mut slot).unwrap();
        assert_eq!(slot.unwrap().second, Position::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_failed_dispatch_leaves_receiver_untouched() {
        let mut coord = Coordinator::new(4);
        let mut slot: Option<VectorTarget> = None;
        assert!(dispatch_into(&mut coord, A, C, &mut slot).is_err());
        assert!(slot.is_none());
    }
}
