//! Presentation-side receiver
//!
//! Notifications reach the presentation tier unordered and at most once.
//! `PresentationTracker` keeps the one pick each session is drawing and
//! uses the sequence carried in every key to drop anything stale or
//! duplicated, so a late `selection_started` can never resurrect a pick
//! the authoritative side already closed.

use std::collections::HashMap;

use serde::Serialize;
use vectarget_core_types::SessionId;

use crate::model::{Position, PresentationParameters};
use crate::notify::{CancelRequest, Notification, SelectionKey};

/// A pick currently drawn for a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSelection {
    pub key: SelectionKey,
    pub first_point: Position,
    pub presentation: PresentationParameters,
}

/// Effect of one notification on the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerUpdate {
    Started,
    Finished,
    Cancelled,
    QueueFull,
    /// Older than what the session has already seen
    IgnoredStale,
    /// Terminal notification for a pick that is not the active one
    IgnoredMismatch,
}

impl TrackerUpdate {
    pub fn changed_state(self) -> bool {
        !matches!(
            self,
            TrackerUpdate::IgnoredStale | TrackerUpdate::IgnoredMismatch
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct PresentationTracker {
    active: HashMap<SessionId, ActiveSelection>,
    last_started: HashMap<SessionId, i64>,
    last_closed: HashMap<SessionId, i64>,
}

impl PresentationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one notification from the authoritative tier
    pub fn receive(&mut self, notification: &Notification) -> TrackerUpdate {
        let key = *notification.key();
        let update = match notification {
            Notification::SelectionStarted {
                first_point,
                presentation,
                ..
            } => self.start(key, *first_point, presentation),
            Notification::SelectionFinished { .. } => self.close(key, TrackerUpdate::Finished),
            Notification::SelectionCancelled { .. } => self.close(key, TrackerUpdate::Cancelled),
            Notification::QueueFull { .. } => self.close(key, TrackerUpdate::QueueFull),
        };

        tracing::debug!(
            %key,
            kind = notification.kind_name(),
            update = ?update,
            "presentation notification"
        );
        update
    }

    fn start(
        &mut self,
        key: SelectionKey,
        first_point: Position,
        presentation: &PresentationParameters,
    ) -> TrackerUpdate {
        let session = key.session_id;
        let started = self.last_started.get(&session).copied().unwrap_or(i64::MIN);
        let closed = self.last_closed.get(&session).copied().unwrap_or(i64::MIN);
        if key.sequence < started || key.sequence <= closed {
            return TrackerUpdate::IgnoredStale;
        }

        self.last_started.insert(session, key.sequence);
        self.active.insert(
            session,
            ActiveSelection {
                key,
                first_point,
                presentation: presentation.clone(),
            },
        );
        TrackerUpdate::Started
    }

    fn close(&mut self, key: SelectionKey, update: TrackerUpdate) -> TrackerUpdate {
        let session = key.session_id;
        // Remember the close even if the start has not arrived yet
        let closed = self.last_closed.entry(session).or_insert(key.sequence);
        *closed = (*closed).max(key.sequence);

        let matches = self.active.get(&session).is_some_and(|active| {
            active.key.actor_id == key.actor_id
                && active.key.capability_id == key.capability_id
                && key.sequence >= active.key.sequence
        });
        if !matches {
            return TrackerUpdate::IgnoredMismatch;
        }

        self.active.remove(&session);
        update
    }

    /// The pick a session is drawing, if any
    pub fn active(&self, session_id: SessionId) -> Option<&ActiveSelection> {
        self.active.get(&session_id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Cancel to send upstream when the user abandons the active pick
    pub fn cancel_request(&self, session_id: SessionId) -> Option<CancelRequest> {
        self.active
            .get(&session_id)
            .map(|active| CancelRequest { key: active.key })
    }
}
