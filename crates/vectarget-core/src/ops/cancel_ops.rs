use vectarget_core_types::SessionId;

use crate::notify::{CancelRequest, Notification, SelectionKey};
use crate::state::Coordinator;

/// Honor a cancel echoed back by the presentation tier
///
/// The request only takes effect while the session's pending pick has
/// exactly the requested actor, capability and sequence; anything else is a
/// stale or duplicate cancel and leaves state untouched. Completed picks
/// already live in the host's own queue and are not affected.
///
/// Returns the `selection_cancelled` notification when honored.
pub fn handle_cancel_request(
    coord: &mut Coordinator,
    request: &CancelRequest,
) -> Option<Notification> {
    let key = request.key;
    let matches = coord.pending.get(key.session_id).is_some_and(|pending| {
        pending.targets(key.actor_id, key.capability_id) && pending.sequence == key.sequence
    });

    if !matches {
        tracing::debug!(
            session_id = key.session_id.get(),
            actor_id = key.actor_id.get(),
            capability_id = key.capability_id.get(),
            sequence = key.sequence,
            "ignoring cancel that no longer matches a pending pick"
        );
        return None;
    }

    coord.pending.clear(key.session_id);
    tracing::debug!(%key, "pending pick cancelled on request");
    Some(Notification::SelectionCancelled { key })
}

/// Drop a session's pending pick from the authoritative side
///
/// Used when the session goes away (disconnect, actor removed).
pub fn cancel_session(coord: &mut Coordinator, session_id: SessionId) -> Option<Notification> {
    let pending = coord.pending.clear(session_id)?;
    Some(Notification::SelectionCancelled {
        key: SelectionKey {
            session_id,
            actor_id: pending.actor_id,
            capability_id: pending.capability_id,
            sequence: pending.sequence,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DistanceBounds, PendingSelection, Position, PresentationParameters};
    use vectarget_core_types::{ActorId, CapabilityId};

    const S: SessionId = SessionId::new(2);

    fn with_pending(sequence: i64) -> Coordinator {
        let mut coord = Coordinator::new(4);
        coord.pending_mut().set(
            S,
            PendingSelection {
                capability_id: CapabilityId::new(9),
                actor_id: ActorId::new(4),
                first_point: Position::ZERO,
                queue: false,
                distance_bounds: DistanceBounds::default(),
                presentation: PresentationParameters::new(),
                sequence,
            },
        );
        coord
    }

    fn request(sequence: i64) -> CancelRequest {
        CancelRequest {
            key: SelectionKey {
                session_id: S,
                actor_id: ActorId::new(4),
                capability_id: CapabilityId::new(9),
                sequence,
            },
        }
    }

    #[test]
    fn test_matching_cancel_is_honored() {
        let mut coord = with_pending(15);
        let notification = handle_cancel_request(&mut coord, &request(15)).unwrap();
        assert_eq!(notification.kind_name(), "selection_cancelled");
        assert!(coord.pending().is_empty());
    }

    #[test]
    fn test_stale_cancel_is_ignored() {
        let mut coord = with_pending(15);
        assert!(handle_cancel_request(&mut coord, &request(12)).is_none());
        assert_eq!(coord.pending().len(), 1);
    }

    #[test]
    fn test_duplicate_cancel_is_ignored() {
        let mut coord = with_pending(15);
        assert!(handle_cancel_request(&mut coord, &request(15)).is_some());
        assert!(handle_cancel_request(&mut coord, &request(15)).is_none());
    }

    #[test]
    fn test_cancel_session() {
        let mut coord = with_pending(3);
        let notification = cancel_session(&mut coord, S).unwrap();
        assert_eq!(notification.key().sequence, 3);
        assert!(cancel_session(&mut coord, S).is_none());
    }
}
