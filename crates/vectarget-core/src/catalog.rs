//! Capability lookup
//!
//! This module defines the `CapabilityResolver` trait, which maps the
//! capability id carried by a host order to the host's view of that
//! capability. The resolver is injected into `apply()` so the core never
//! reaches into the host's ability objects directly.

use std::collections::HashMap;

use vectarget_core_types::CapabilityId;

use crate::errors::{Result, VectorTargetError};
use crate::model::{CapabilityConfig, VectorCapability};

/// Resolves capability ids to capability views
pub trait CapabilityResolver {
    /// Look up a capability
    ///
    /// # Returns
    /// * `Some` - the capability exists on the host
    /// * `None` - unknown; orders naming it take the ordinary path
    fn resolve(&self, capability_id: CapabilityId) -> Option<&dyn VectorCapability>;
}

/// Resolver that knows no capabilities
///
/// Every order takes the ordinary path, which still maintains queue
/// clearing and pending-pick cancellation.
///
/// # Example
/// ```
/// use vectarget_core::catalog::{CapabilityResolver, NoCapabilities};
/// use vectarget_core::CapabilityId;
///
/// assert!(NoCapabilities.resolve(CapabilityId::new(1)).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapabilities;

impl CapabilityResolver for NoCapabilities {
    fn resolve(&self, _capability_id: CapabilityId) -> Option<&dyn VectorCapability> {
        None
    }
}

/// Map-backed resolver over configured capabilities
///
/// # Example
/// ```
/// use vectarget_core::catalog::{CapabilityCatalog, CapabilityResolver};
/// use vectarget_core::model::{CapabilityConfig, PointOfCastMode};
/// use vectarget_core::CapabilityId;
///
/// let mut catalog = CapabilityCatalog::new();
/// catalog
///     .insert(CapabilityConfig::two_phase(CapabilityId::new(7), PointOfCastMode::Midpoint))
///     .unwrap();
///
/// let cap = catalog.resolve(CapabilityId::new(7)).unwrap();
/// assert!(cap.is_two_phase_enabled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapabilityCatalog {
    capabilities: HashMap<CapabilityId, CapabilityConfig>,
}

impl CapabilityCatalog {
    pub fn new() -> Self {
        Self {
            capabilities: HashMap::new(),
        }
    }

    /// Register a capability
    ///
    /// # Errors
    /// * `InvalidConfiguration` - a capability with the same id is already registered
    pub fn insert(&mut self, capability: CapabilityConfig) -> Result<()> {
        if self.capabilities.contains_key(&capability.id) {
            return Err(VectorTargetError::InvalidConfiguration {
                reason: format!("duplicate capability id {}", capability.id.get()),
            });
        }
        self.capabilities.insert(capability.id, capability);
        Ok(())
    }

    /// Get a capability's configuration
    ///
    /// # Errors
    /// * `UnknownCapability` - the id is not registered
    pub fn get(&self, capability_id: CapabilityId) -> Result<&CapabilityConfig> {
        self.capabilities
            .get(&capability_id)
            .ok_or(VectorTargetError::UnknownCapability { capability_id })
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Capabilities sorted by id
    pub fn iter_sorted(&self) -> Vec<&CapabilityConfig> {
        let mut all: Vec<_> = self.capabilities.values().collect();
        all.sort_by_key(|c| c.id);
        all
    }
}

impl CapabilityResolver for CapabilityCatalog {
    fn resolve(&self, capability_id: CapabilityId) -> Option<&dyn VectorCapability> {
        self.capabilities
            .get(&capability_id)
            .map(|c| c as &dyn VectorCapability)
    }
}
