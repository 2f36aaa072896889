//! Single entry point for host events
//!
//! `apply()` routes each `HostEvent` to the interceptor, the dispatch
//! binding, or cancel handling, against a caller-owned `Coordinator`.
//!
//! ## Event Contract
//!
//! - **One transition per event**: each call runs to completion; state is
//!   never left half-updated between events
//! - **Orders never fail**: stale, superseded and overflowing orders are
//!   decisions and notifications, not errors
//! - **Empty dispatch is fatal**: a dispatch with nothing queued is the only
//!   `Err`, because the host and the core no longer agree on the queue
//!
//! ## Example
//!
//! ```
//! use vectarget_core::{apply, Coordinator, HostEvent, Command, Position};
//! use vectarget_core::catalog::CapabilityCatalog;
//! use vectarget_core::model::{CapabilityConfig, PointOfCastMode};
//! use vectarget_core::{ActorId, CapabilityId, SessionId};
//!
//! let cap = CapabilityId::new(7);
//! let mut catalog = CapabilityCatalog::new();
//! catalog.insert(CapabilityConfig::two_phase(cap, PointOfCastMode::Midpoint)).unwrap();
//!
//! let mut coord = Coordinator::default();
//! let first = Command::cast_position(SessionId::new(0), ActorId::new(1), cap, 10, Position::ZERO);
//! let outcome = apply(&mut coord, HostEvent::Order(first), &catalog).unwrap();
//! assert_eq!(outcome.notifications().len(), 1);
//! ```

use serde::Serialize;

use crate::catalog::CapabilityResolver;
use crate::errors::Result;
use crate::events::HostEvent;
use crate::model::VectorTarget;
use crate::notify::Notification;
use crate::ops::{dispatch_ops, handle_cancel_request, intercept_order, InterceptOutcome};
use crate::state::Coordinator;

/// Result of applying one host event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    /// An order went through interception
    Order(InterceptOutcome),
    /// A queued action received its paired points
    Dispatched { target: VectorTarget },
    /// A cancel request was checked against live state
    Cancel {
        honored: bool,
        notifications: Vec<Notification>,
    },
}

impl EventOutcome {
    /// Notifications to forward to the presentation tier
    pub fn notifications(&self) -> &[Notification] {
        match self {
            EventOutcome::Order(outcome) => &outcome.notifications,
            EventOutcome::Dispatched { .. } => &[],
            EventOutcome::Cancel { notifications, .. } => notifications,
        }
    }

    pub fn into_notifications(self) -> Vec<Notification> {
        match self {
            EventOutcome::Order(outcome) => outcome.notifications,
            EventOutcome::Dispatched { .. } => Vec::new(),
            EventOutcome::Cancel { notifications, .. } => notifications,
        }
    }
}

/// Apply a host event to the coordinator
///
/// # Arguments
///
/// * `coord` - Targeting state, updated in place
/// * `event` - Event to process
/// * `resolver` - Host view of capabilities, for order events
///
/// # Errors
///
/// * `EmptyQueue` - a `DispatchStart` found nothing queued for its pair.
///   The coordinator is left as it was.
pub fn apply(
    coord: &mut Coordinator,
    event: HostEvent,
    resolver: &dyn CapabilityResolver,
) -> Result<EventOutcome> {
    match event {
        HostEvent::Order(command) => {
            let capability = command.capability_id.and_then(|id| resolver.resolve(id));
            let outcome = intercept_order(coord, &command, capability);
            Ok(EventOutcome::Order(outcome))
        }

        HostEvent::DispatchStart {
            actor_id,
            capability_id,
        } => {
            let target = dispatch_ops::dispatch_start(coord, actor_id, capability_id)?;
            Ok(EventOutcome::Dispatched { target })
        }

        HostEvent::CancelRequested(request) => {
            let notifications: Vec<_> = handle_cancel_request(coord, &request)
                .into_iter()
                .collect();
            Ok(EventOutcome::Cancel {
                honored: !notifications.is_empty(),
                notifications,
            })
        }
    }
}
