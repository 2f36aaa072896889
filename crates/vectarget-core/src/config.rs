//! Capability configuration
//!
//! Capabilities and the queue capacity are read from TOML:
//!
//! ```toml
//! queue_capacity = 32
//!
//! [[capabilities]]
//! id = 7
//! point_of_cast = "midpoint"
//! min_distance = 100.0
//! [capabilities.presentation]
//! effect = "particles/vector_arrow"
//! ```
//!
//! Everything is validated at load time; a bad point-of-cast mode is an
//! error here, never at cast time.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use vectarget_core_types::CapabilityId;

use crate::catalog::CapabilityCatalog;
use crate::errors::{Result, VectorTargetError};
use crate::model::{CapabilityConfig, DistanceBounds, PointOfCastMode, PresentationParameters};
use crate::state::{Coordinator, DEFAULT_QUEUE_CAPACITY};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default = "default_queue_capacity")]
    queue_capacity: usize,
    #[serde(default)]
    capabilities: Vec<RawCapability>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCapability {
    id: CapabilityId,
    #[serde(default = "default_vector_targeting")]
    vector_targeting: bool,
    #[serde(default)]
    point_of_cast: Option<String>,
    #[serde(default)]
    min_distance: Option<f32>,
    #[serde(default)]
    max_distance: Option<f32>,
    #[serde(default)]
    presentation: PresentationParameters,
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_vector_targeting() -> bool {
    true
}

/// Validated targeting configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TargetingConfig {
    pub queue_capacity: usize,
    pub capabilities: Vec<CapabilityConfig>,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            capabilities: Vec::new(),
        }
    }
}

impl TargetingConfig {
    /// Load and validate a TOML file
    ///
    /// # Errors
    ///
    /// * `Io` - the file cannot be read
    /// * `Config` - the file is not valid TOML for this schema
    /// * `InvalidConfiguration` - see [`TargetingConfig::from_toml_str`]
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| VectorTargetError::Io {
            message: format!("{}: {}", path.display(), err),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    ///
    /// * `Config` - malformed TOML, a missing `id` or an unknown key
    /// * `InvalidConfiguration` - `queue_capacity = 0`, an unknown
    ///   `point_of_cast`, or the same capability id listed twice
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;

        if raw.queue_capacity == 0 {
            return Err(VectorTargetError::InvalidConfiguration {
                reason: "queue_capacity must be at least 1".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut capabilities = Vec::with_capacity(raw.capabilities.len());
        for cap in raw.capabilities {
            if !seen.insert(cap.id) {
                return Err(VectorTargetError::InvalidConfiguration {
                    reason: format!("duplicate capability id {}", cap.id.get()),
                });
            }

            let point_of_cast = match cap.point_of_cast.as_deref() {
                Some(mode) => mode.parse::<PointOfCastMode>()?,
                None => PointOfCastMode::default(),
            };

            capabilities.push(CapabilityConfig {
                id: cap.id,
                two_phase: cap.vector_targeting,
                point_of_cast,
                distance_bounds: DistanceBounds::new(cap.min_distance, cap.max_distance),
                presentation: cap.presentation,
            });
        }

        tracing::debug!(
            queue_capacity = raw.queue_capacity,
            capabilities = capabilities.len(),
            "targeting config loaded"
        );

        Ok(Self {
            queue_capacity: raw.queue_capacity,
            capabilities,
        })
    }

    /// Build the capability catalog
    ///
    /// # Errors
    ///
    /// * `InvalidConfiguration` - duplicate ids (only when the config was
    ///   assembled by hand rather than loaded)
    pub fn catalog(&self) -> Result<CapabilityCatalog> {
        let mut catalog = CapabilityCatalog::new();
        for cap in &self.capabilities {
            catalog.insert(cap.clone())?;
        }
        Ok(catalog)
    }

    /// Fresh coordinator sized by `queue_capacity`, plus the catalog
    ///
    /// # Errors
    ///
    /// Same as [`TargetingConfig::catalog`].
    pub fn into_parts(self) -> Result<(Coordinator, CapabilityCatalog)> {
        let catalog = self.catalog()?;
        Ok((Coordinator::new(self.queue_capacity), catalog))
    }
}
