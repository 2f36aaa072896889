use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vectarget_core_types::CapabilityId;

use super::params::{DistanceBounds, PresentationParameters};
use super::position::Position;
use crate::errors::VectorTargetError;

/// Which point of a completed pick is written back into the host order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointOfCastMode {
    /// The first point picked
    #[default]
    Initial,
    /// The second point picked
    Terminal,
    /// Halfway between the two
    Midpoint,
}

impl PointOfCastMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PointOfCastMode::Initial => "initial",
            PointOfCastMode::Terminal => "terminal",
            PointOfCastMode::Midpoint => "midpoint",
        }
    }
}

impl FromStr for PointOfCastMode {
    type Err = VectorTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "initial" => Ok(PointOfCastMode::Initial),
            "terminal" => Ok(PointOfCastMode::Terminal),
            "midpoint" => Ok(PointOfCastMode::Midpoint),
            other => Err(VectorTargetError::InvalidConfiguration {
                reason: format!(
                    "unknown point_of_cast '{}' (expected initial, terminal or midpoint)",
                    other
                ),
            }),
        }
    }
}

/// Read-only view of a capability as the interceptor needs it
///
/// Implemented by whatever ability representation the host exposes.
pub trait VectorCapability {
    /// Whether casts of this capability take two points
    fn is_two_phase_enabled(&self) -> bool;

    /// Point written back into the host order once both points are known
    fn point_of_cast_mode(&self) -> PointOfCastMode;

    /// Configured distance bounds (passed through, never enforced)
    fn distance_bounds(&self) -> DistanceBounds;

    /// Opaque settings forwarded to the presentation tier
    fn presentation_parameters(&self) -> &PresentationParameters;
}

/// Concrete capability settings, as loaded from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityConfig {
    pub id: CapabilityId,
    pub two_phase: bool,
    pub point_of_cast: PointOfCastMode,
    pub distance_bounds: DistanceBounds,
    pub presentation: PresentationParameters,
}

impl CapabilityConfig {
    /// A two-phase capability with the given point-of-cast mode and no extras
    pub fn two_phase(id: CapabilityId, point_of_cast: PointOfCastMode) -> Self {
        Self {
            id,
            two_phase: true,
            point_of_cast,
            distance_bounds: DistanceBounds::default(),
            presentation: PresentationParameters::new(),
        }
    }

    /// A capability that casts at a single point as the host intends
    pub fn single_point(id: CapabilityId) -> Self {
        Self {
            two_phase: false,
            ..Self::two_phase(id, PointOfCastMode::Initial)
        }
    }

    pub fn with_distance_bounds(mut self, bounds: DistanceBounds) -> Self {
        self.distance_bounds = bounds;
        self
    }

    pub fn with_presentation(mut self, presentation: PresentationParameters) -> Self {
        self.presentation = presentation;
        self
    }
}

impl VectorCapability for CapabilityConfig {
    fn is_two_phase_enabled(&self) -> bool {
        self.two_phase
    }

    fn point_of_cast_mode(&self) -> PointOfCastMode {
        self.point_of_cast
    }

    fn distance_bounds(&self) -> DistanceBounds {
        self.distance_bounds
    }

    fn presentation_parameters(&self) -> &PresentationParameters {
        &self.presentation
    }
}

/// Point written into the host order for a completed pick
///
/// Pure in `(mode, first, second)`.
pub fn point_of_cast(mode: PointOfCastMode, first: Position, second: Position) -> Position {
    match mode {
        PointOfCastMode::Initial => first,
        PointOfCastMode::Terminal => second,
        PointOfCastMode::Midpoint => first.midpoint(second),
    }
}
