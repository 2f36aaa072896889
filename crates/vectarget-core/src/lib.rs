//! vectarget core - two-point targeting on top of a single-point host
//!
//! This crate turns pairs of host "cast at position" orders into vector
//! picks, including:
//! - Sparse, sequence-keyed action queues per actor and capability
//! - Pending first-point selections per issuing session
//! - The order interceptor (suppress / allow / allow-rewritten)
//! - Dispatch binding that hands queued point pairs to capabilities
//! - Keyed notifications and cancel handling across the presentation split
//! - TOML capability configuration and a host boundary adapter

pub mod adapter;
pub mod apply;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod events;
pub mod logging_facility;
pub mod model;
pub mod notify;
pub mod ops;
pub mod presentation;
pub mod state;

// Used by the logging macros
pub use vectarget_core_types;

// Re-export commonly used types
pub use adapter::HostOrderAdapter;
pub use apply::{apply, EventOutcome};
pub use catalog::{CapabilityCatalog, CapabilityResolver};
pub use config::TargetingConfig;
pub use errors::{ExError, ExErrorKind, Result, VectorTargetError};
pub use events::HostEvent;
pub use model::{Command, OrderKind, PointOfCastMode, Position, VectorTarget};
pub use notify::{CancelRequest, Notification, NotificationSink, SelectionKey};
pub use ops::Decision;
pub use presentation::PresentationTracker;
pub use state::Coordinator;
pub use vectarget_core_types::{ActorId, CapabilityId, SessionId};
