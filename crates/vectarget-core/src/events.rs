//! Host events
//!
//! Everything the host tells the targeting core arrives as a `HostEvent`
//! and is processed by the `apply()` function, one event at a time.

use serde::{Deserialize, Serialize};
use vectarget_core_types::{ActorId, CapabilityId};

use crate::model::Command;
use crate::notify::CancelRequest;

/// Event delivered by the host or echoed back by the presentation tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// The host is about to execute an issued order
    Order(Command),

    /// The host is starting the next queued action of a capability
    DispatchStart {
        actor_id: ActorId,
        capability_id: CapabilityId,
    },

    /// The presentation tier asks to abandon a pick
    CancelRequested(CancelRequest),
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Order(_) => "order",
            HostEvent::DispatchStart { .. } => "dispatch_start",
            HostEvent::CancelRequested(_) => "cancel_requested",
        }
    }
}
