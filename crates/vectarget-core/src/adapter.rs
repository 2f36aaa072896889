//! Host boundary adapter
//!
//! The host's order filter wants a boolean back and expects the order
//! record to be edited in place. `HostOrderAdapter` owns the coordinator,
//! the capability resolver and the notification sink, and translates each
//! `Decision` into that protocol.

use vectarget_core_types::{ActorId, CapabilityId, SessionId};

use crate::apply::{apply, EventOutcome};
use crate::catalog::CapabilityResolver;
use crate::errors::{Result, VectorTargetError};
use crate::events::HostEvent;
use crate::model::{Command, VectorTarget, VectorTargetReceiver};
use crate::notify::{CancelRequest, NotificationSink};
use crate::ops::{cancel_session, Decision};
use crate::state::Coordinator;

pub struct HostOrderAdapter<R, S> {
    coordinator: Coordinator,
    resolver: R,
    sink: S,
}

impl<R, S> HostOrderAdapter<R, S>
where
    R: CapabilityResolver,
    S: NotificationSink,
{
    pub fn new(coordinator: Coordinator, resolver: R, sink: S) -> Self {
        Self {
            coordinator,
            resolver,
            sink,
        }
    }

    /// Order-filter hook
    ///
    /// Returns `false` when the host must drop the order. An accepted
    /// order may come back with a rewritten `position` and a forced
    /// `queue` flag.
    pub fn filter_order(&mut self, command: &mut Command) -> bool {
        let decision = self.filter_order_decision(command);
        decision.accepts()
    }

    /// Like `filter_order`, but hands back the full decision
    pub fn filter_order_decision(&mut self, command: &mut Command) -> Decision {
        let event = HostEvent::Order(command.clone());
        // Orders never produce an error
        let outcome = match apply(&mut self.coordinator, event, &self.resolver) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "order interception failed; allowing order");
                return Decision::Allow;
            }
        };

        let decision = match &outcome {
            EventOutcome::Order(o) => o.decision,
            _ => Decision::Allow,
        };
        if let Decision::AllowRewritten { position, queue } = decision {
            command.position = position;
            command.queue = queue;
        }

        self.forward(outcome);
        decision
    }

    /// Dispatch-start hook
    ///
    /// # Errors
    ///
    /// * `EmptyQueue` - nothing queued for the pair; the receiver is not
    ///   called
    pub fn on_dispatch_start(
        &mut self,
        actor_id: ActorId,
        capability_id: CapabilityId,
        receiver: &mut dyn VectorTargetReceiver,
    ) -> Result<VectorTarget> {
        let event = HostEvent::DispatchStart {
            actor_id,
            capability_id,
        };
        let target = match apply(&mut self.coordinator, event, &self.resolver)? {
            EventOutcome::Dispatched { target } => target,
            other => {
                // apply() answers a dispatch with Dispatched or an error
                tracing::error!(outcome = ?other, "unexpected outcome for dispatch start");
                return Err(VectorTargetError::EmptyQueue {
                    actor_id,
                    capability_id,
                });
            }
        };
        receiver.receive_vector_target(target);
        Ok(target)
    }

    /// Cancel echoed back by the presentation tier; `true` if honored
    pub fn on_cancel_request(&mut self, request: &CancelRequest) -> bool {
        let event = HostEvent::CancelRequested(*request);
        match apply(&mut self.coordinator, event, &self.resolver) {
            Ok(outcome) => {
                let honored = matches!(outcome, EventOutcome::Cancel { honored: true, .. });
                self.forward(outcome);
                honored
            }
            Err(err) => {
                tracing::error!(error = %err, "cancel request failed");
                false
            }
        }
    }

    /// Session went away; drop its pending pick
    pub fn on_session_closed(&mut self, session_id: SessionId) {
        if let Some(notification) = cancel_session(&mut self.coordinator, session_id) {
            self.sink.send(notification);
        }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn forward(&mut self, outcome: EventOutcome) {
        for notification in outcome.into_notifications() {
            self.sink.send(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CapabilityCatalog;
    use crate::model::{CapabilityConfig, OrderKind, PointOfCastMode, Position};
    use crate::notify::{Notification, SelectionKey};

    const S: SessionId = SessionId::new(3);
    const A: ActorId = ActorId::new(30);
    const C: CapabilityId = CapabilityId::new(4);

    fn adapter(mode: PointOfCastMode) -> HostOrderAdapter<CapabilityCatalog, Vec<Notification>> {
        let mut catalog = CapabilityCatalog::new();
        catalog.insert(CapabilityConfig::two_phase(C, mode)).unwrap();
        HostOrderAdapter::new(Coordinator::new(4), catalog, Vec::new())
    }

    fn cast(seq: i64, x: f32) -> Command {
        Command::cast_position(S, A, C, seq, Position::new(x, 0.0, 0.0))
    }

    #[test]
    fn test_first_point_is_rejected() {
        let mut adapter = adapter(PointOfCastMode::Midpoint);
        let mut cmd = cast(1, 2.0);
        assert!(!adapter.filter_order(&mut cmd));
        assert_eq!(cmd.position, Position::new(2.0, 0.0, 0.0));
        assert_eq!(adapter.sink().len(), 1);
    }

    #[test]
    fn test_second_point_rewrites_record() {
        let mut adapter = adapter(PointOfCastMode::Midpoint);
        adapter.filter_order(&mut cast(1, 0.0));

        let mut second = cast(2, 8.0);
        assert!(adapter.filter_order(&mut second));
        assert_eq!(second.position, Position::new(4.0, 0.0, 0.0));
        assert!(!second.queue);
        assert_eq!(
            adapter.sink().last().map(Notification::kind_name),
            Some("selection_finished")
        );
    }

    #[test]
    fn test_shift_first_point_forces_queue_flag() {
        let mut adapter = adapter(PointOfCastMode::Terminal);
        adapter.filter_order(&mut cast(1, 0.0).queued(true));

        let mut second = cast(2, 5.0);
        adapter.filter_order(&mut second);
        assert!(second.queue);
        assert_eq!(second.position, Position::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_dispatch_feeds_receiver() {
        let mut adapter = adapter(PointOfCastMode::Initial);
        adapter.filter_order(&mut cast(1, 1.0));
        adapter.filter_order(&mut cast(2, 3.0));

        let mut slot: Option<VectorTarget> = None;
        let target = adapter.on_dispatch_start(A, C, &mut slot).unwrap();
        assert_eq!(slot, Some(target));
        assert_eq!(target.first, Position::new(1.0, 0.0, 0.0));
        assert!(adapter.on_dispatch_start(A, C, &mut slot).is_err());
    }

    #[test]
    fn test_cancel_and_session_close() {
        let mut adapter = adapter(PointOfCastMode::Initial);
        adapter.filter_order(&mut cast(6, 1.0));

        let request = CancelRequest {
            key: SelectionKey {
                session_id: S,
                actor_id: A,
                capability_id: C,
                sequence: 6,
            },
        };
        assert!(adapter.on_cancel_request(&request));
        assert!(!adapter.on_cancel_request(&request));

        adapter.filter_order(&mut cast(7, 1.0));
        adapter.on_session_closed(S);
        assert!(adapter.coordinator().pending().is_empty());
        let kinds: Vec<_> = adapter.sink().iter().map(Notification::kind_name).collect();
        assert_eq!(
            kinds,
            vec![
                "selection_started",
                "selection_cancelled",
                "selection_started",
                "selection_cancelled"
            ]
        );
    }

    #[test]
    fn test_plain_order_passes_untouched() {
        let mut adapter = adapter(PointOfCastMode::Initial);
        let mut stop = Command::plain(S, vec![A], OrderKind::Stop, 1);
        assert!(adapter.filter_order(&mut stop));
        assert!(adapter.sink().is_empty());
    }
}
