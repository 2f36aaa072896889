//! Cross-tier notifications
//!
//! Everything the authoritative side tells the presentation tier goes
//! through `Notification`. Delivery is fire-and-forget and may reorder or
//! drop messages, so every variant carries the full key
//! (session, actor, capability, sequence) and receivers discard anything
//! that no longer matches their state.

use serde::{Deserialize, Serialize};
use vectarget_core_types::{ActorId, CapabilityId, SessionId};

use crate::model::{Position, PresentationParameters};

/// Identifies one pick across both tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    pub session_id: SessionId,
    pub actor_id: ActorId,
    pub capability_id: CapabilityId,
    pub sequence: i64,
}

impl std::fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/seq={}",
            self.session_id, self.actor_id, self.capability_id, self.sequence
        )
    }
}

/// Message sent from the authoritative tier to the presentation tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// First point captured; the presentation tier starts drawing the pick
    SelectionStarted {
        #[serde(flatten)]
        key: SelectionKey,
        first_point: Position,
        presentation: PresentationParameters,
    },
    /// Second point accepted and the pick queued
    SelectionFinished {
        #[serde(flatten)]
        key: SelectionKey,
    },
    /// Pick abandoned before its second point
    SelectionCancelled {
        #[serde(flatten)]
        key: SelectionKey,
    },
    /// Second point accepted but the queue was full; nothing was queued
    QueueFull {
        #[serde(flatten)]
        key: SelectionKey,
    },
}

impl Notification {
    pub fn key(&self) -> &SelectionKey {
        match self {
            Notification::SelectionStarted { key, .. }
            | Notification::SelectionFinished { key }
            | Notification::SelectionCancelled { key }
            | Notification::QueueFull { key } => key,
        }
    }

    /// Stable lowercase name, as used on the wire and in logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Notification::SelectionStarted { .. } => "selection_started",
            Notification::SelectionFinished { .. } => "selection_finished",
            Notification::SelectionCancelled { .. } => "selection_cancelled",
            Notification::QueueFull { .. } => "queue_full",
        }
    }

    /// Whether this ends the pick it refers to
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Notification::SelectionStarted { .. })
    }
}

/// Request from the presentation tier to abandon a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(flatten)]
    pub key: SelectionKey,
}

/// Destination for outbound notifications
///
/// Implementations must not block; delivery is best effort.
pub trait NotificationSink {
    fn send(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn send(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Sink that drops everything (for hosts without a presentation tier)
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl NotificationSink for DiscardSink {
    fn send(&mut self, _notification: Notification) {}
}
