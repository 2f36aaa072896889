use std::collections::HashMap;

use vectarget_core_types::SessionId;

use crate::model::PendingSelection;

/// In-flight two-phase picks, at most one per issuing session
#[derive(Debug, Clone, Default)]
pub struct PendingSelectionTable {
    selections: HashMap<SessionId, PendingSelection>,
}

impl PendingSelectionTable {
    pub fn new() -> Self {
        Self {
            selections: HashMap::new(),
        }
    }

    pub fn get(&self, session_id: SessionId) -> Option<&PendingSelection> {
        self.selections.get(&session_id)
    }

    /// Store a pick for the session, returning the one it replaced
    pub fn set(
        &mut self,
        session_id: SessionId,
        selection: PendingSelection,
    ) -> Option<PendingSelection> {
        self.selections.insert(session_id, selection)
    }

    /// Remove and return the session's pick
    pub fn clear(&mut self, session_id: SessionId) -> Option<PendingSelection> {
        self.selections.remove(&session_id)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
