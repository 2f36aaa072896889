use super::pending_table::PendingSelectionTable;
use super::queue_registry::ActionQueueRegistry;
use super::sparse_queue::DEFAULT_QUEUE_CAPACITY;

/// All cross-event targeting state
///
/// Owned by the caller and passed by reference into every handler; there is
/// no ambient state. Not thread-safe (no Arc/RwLock): the host delivers
/// events one at a time and each handler runs to completion.
#[derive(Debug, Clone)]
pub struct Coordinator {
    pub(crate) queues: ActionQueueRegistry,
    pub(crate) pending: PendingSelectionTable,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl Coordinator {
    /// Create an empty coordinator with the given per-queue capacity
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            queues: ActionQueueRegistry::new(queue_capacity),
            pending: PendingSelectionTable::new(),
        }
    }

    pub fn queues(&self) -> &ActionQueueRegistry {
        &self.queues
    }

    pub fn pending(&self) -> &PendingSelectionTable {
        &self.pending
    }

    /// Mutable access to the queues
    ///
    /// This is a public method to enable test helpers.
    pub fn queues_mut(&mut self) -> &mut ActionQueueRegistry {
        &mut self.queues
    }

    /// Mutable access to the pending picks
    ///
    /// This is a public method to enable test helpers.
    pub fn pending_mut(&mut self) -> &mut PendingSelectionTable {
        &mut self.pending
    }
}
