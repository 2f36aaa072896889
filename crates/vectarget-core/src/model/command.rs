use serde::{Deserialize, Serialize};
use vectarget_core_types::{ActorId, CapabilityId, SessionId};

use super::position::Position;

/// Order kinds the host can issue
///
/// Only `CastPosition` takes part in two-phase picks; every other kind goes
/// through the ordinary-command path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    MoveToPosition,
    MoveToTarget,
    AttackMove,
    AttackTarget,
    CastPosition,
    CastTarget,
    CastNoTarget,
    CastToggle,
    HoldPosition,
    Stop,
    Other,
}

impl OrderKind {
    pub fn is_cast_position(self) -> bool {
        self == OrderKind::CastPosition
    }
}

/// A raw order as issued by the host
///
/// The interceptor reads every field and, through the boundary adapter,
/// rewrites `position` and `queue` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub session_id: SessionId,
    /// Capability invoked, if the order casts one
    #[serde(default)]
    pub capability_id: Option<CapabilityId>,
    pub actor_ids: Vec<ActorId>,
    pub kind: OrderKind,
    /// Host-stamped global order token; strictly increasing across orders
    pub sequence: i64,
    /// Append to (true) or replace (false) the actors' queued actions
    #[serde(default)]
    pub queue: bool,
    #[serde(default)]
    pub position: Position,
}

impl Command {
    /// Create a position cast order with `queue = false`
    pub fn cast_position(
        session_id: SessionId,
        actor_id: ActorId,
        capability_id: CapabilityId,
        sequence: i64,
        position: Position,
    ) -> Self {
        Self {
            session_id,
            capability_id: Some(capability_id),
            actor_ids: vec![actor_id],
            kind: OrderKind::CastPosition,
            sequence,
            queue: false,
            position,
        }
    }

    /// Create a non-cast order of the given kind
    pub fn plain(
        session_id: SessionId,
        actor_ids: Vec<ActorId>,
        kind: OrderKind,
        sequence: i64,
    ) -> Self {
        Self {
            session_id,
            capability_id: None,
            actor_ids,
            kind,
            sequence,
            queue: false,
            position: Position::ZERO,
        }
    }

    /// Builder-style setter for the shift-queue flag
    pub fn queued(mut self, queue: bool) -> Self {
        self.queue = queue;
        self
    }
}
