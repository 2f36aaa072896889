//! Core types shared across vectarget facilities
//!
//! This crate provides foundational types used by the targeting core,
//! its logging facility and the CLI:
//!
//! - **Identifiers**: SessionId, ActorId, CapabilityId
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{ActorId, CapabilityId, SessionId};
