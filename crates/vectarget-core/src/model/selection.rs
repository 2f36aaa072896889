use serde::{Deserialize, Serialize};
use vectarget_core_types::{ActorId, CapabilityId};

use super::params::{DistanceBounds, PresentationParameters};
use super::position::Position;
use super::vector_target::VectorTarget;

/// A two-phase pick waiting for its second point
///
/// Created from the first cast-position order of a pick and destroyed when
/// the pick completes, is superseded, or is cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSelection {
    pub capability_id: CapabilityId,
    pub actor_id: ActorId,
    pub first_point: Position,
    /// Shift flag of the first order; sticks to the whole gesture
    pub queue: bool,
    pub distance_bounds: DistanceBounds,
    pub presentation: PresentationParameters,
    /// Sequence number of the first order
    pub sequence: i64,
}

impl PendingSelection {
    /// Whether this pick belongs to the given actor/capability pair
    pub fn targets(&self, actor_id: ActorId, capability_id: CapabilityId) -> bool {
        self.actor_id == actor_id && self.capability_id == capability_id
    }

    /// Pair with the second point, consuming the pending pick
    pub fn complete(self, second_point: Position) -> QueueEntry {
        QueueEntry {
            first_point: self.first_point,
            second_point,
            distance_bounds: self.distance_bounds,
            presentation: self.presentation,
        }
    }
}

/// A completed pick waiting for its queued action to start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub first_point: Position,
    pub second_point: Position,
    pub distance_bounds: DistanceBounds,
    pub presentation: PresentationParameters,
}

impl QueueEntry {
    pub fn vector_target(&self) -> VectorTarget {
        VectorTarget::new(self.first_point, self.second_point)
    }
}
