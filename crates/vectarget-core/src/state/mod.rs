pub mod coordinator;
pub mod pending_table;
pub mod queue_registry;
pub mod sparse_queue;

pub use coordinator::Coordinator;
pub use pending_table::PendingSelectionTable;
pub use queue_registry::ActionQueueRegistry;
pub use sparse_queue::{SparseSequenceQueue, DEFAULT_QUEUE_CAPACITY};
