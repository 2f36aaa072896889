//! Identifier newtypes for the parties of a targeting exchange
//!
//! The host stamps every order with the issuing session, the actors it
//! commands and the capability it invokes. All three are small integer
//! handles on the host side; wrapping them keeps them from being mixed up.

use serde::{Deserialize, Serialize};

/// Issuing session (the player or source that issued an order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u32);

impl SessionId {
    /// Wrap a raw host session handle
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// Actor that executes orders (a unit on the host side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(u32);

impl ActorId {
    /// Wrap a raw host actor handle
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// Capability being invoked (an ability owned by an actor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(u32);

impl CapabilityId {
    /// Wrap a raw host capability handle
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "capability:{}", self.0)
    }
}
