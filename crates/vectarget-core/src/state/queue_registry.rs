use std::collections::HashMap;

use vectarget_core_types::{ActorId, CapabilityId};

use super::sparse_queue::{SparseSequenceQueue, DEFAULT_QUEUE_CAPACITY};
use crate::model::QueueEntry;

/// Per-(actor, capability) queues of completed picks
///
/// Queues are allocated lazily on first use and kept afterwards, so an
/// actor's `last` sequence survives until its queues are cleared.
#[derive(Debug, Clone)]
pub struct ActionQueueRegistry {
    queues: HashMap<ActorId, HashMap<CapabilityId, SparseSequenceQueue<QueueEntry>>>,
    capacity: usize,
}

impl Default for ActionQueueRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl ActionQueueRegistry {
    /// Create a registry whose queues hold at most `capacity` entries each
    pub fn new(capacity: usize) -> Self {
        Self {
            queues: HashMap::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get-or-create the queue for an actor/capability pair
    pub fn queue_for(
        &mut self,
        actor_id: ActorId,
        capability_id: CapabilityId,
    ) -> &mut SparseSequenceQueue<QueueEntry> {
        let capacity = self.capacity;
        self.queues
            .entry(actor_id)
            .or_default()
            .entry(capability_id)
            .or_insert_with(|| SparseSequenceQueue::new(capacity))
    }

    /// Look up a queue without allocating one
    pub fn get(
        &self,
        actor_id: ActorId,
        capability_id: CapabilityId,
    ) -> Option<&SparseSequenceQueue<QueueEntry>> {
        self.queues.get(&actor_id)?.get(&capability_id)
    }

    /// Mutable lookup without allocating
    pub fn get_mut(
        &mut self,
        actor_id: ActorId,
        capability_id: CapabilityId,
    ) -> Option<&mut SparseSequenceQueue<QueueEntry>> {
        self.queues.get_mut(&actor_id)?.get_mut(&capability_id)
    }

    /// Number of entries waiting for an actor/capability pair
    pub fn queued_len(&self, actor_id: ActorId, capability_id: CapabilityId) -> usize {
        self.get(actor_id, capability_id)
            .map_or(0, SparseSequenceQueue::len)
    }

    /// Clear every capability queue of each listed actor
    ///
    /// Returns the total number of entries dropped.
    pub fn clear_queues_for_actors(&mut self, actor_ids: &[ActorId]) -> usize {
        let mut removed = 0;
        for actor_id in actor_ids {
            if let Some(by_capability) = self.queues.get_mut(actor_id) {
                removed += by_capability
                    .values_mut()
                    .map(SparseSequenceQueue::clear)
                    .sum::<usize>();
            }
        }
        removed
    }

    /// Highest `last` across the actor's queues, or -1 if it has none
    pub fn max_outstanding_sequence(&self, actor_id: ActorId) -> i64 {
        self.queues
            .get(&actor_id)
            .and_then(|by_capability| {
                by_capability
                    .values()
                    .map(SparseSequenceQueue::last)
                    .max()
            })
            .unwrap_or(-1)
    }

    /// Total number of entries waiting across all queues
    pub fn total_queued(&self) -> usize {
        self.queues
            .values()
            .flat_map(HashMap::values)
            .map(SparseSequenceQueue::len)
            .sum()
    }
}
