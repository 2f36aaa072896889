use serde::{Deserialize, Serialize};

use super::capability::{point_of_cast, PointOfCastMode};
use super::position::Position;

/// The paired points a capability receives when its queued action starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorTarget {
    pub first: Position,
    pub second: Position,
}

impl VectorTarget {
    pub fn new(first: Position, second: Position) -> Self {
        Self { first, second }
    }

    /// `second - first`
    pub fn vector(&self) -> Position {
        self.second.sub(self.first)
    }

    /// Unit vector from first to second; zero when both points coincide
    pub fn direction(&self) -> Position {
        self.vector().normalized()
    }

    pub fn midpoint(&self) -> Position {
        self.first.midpoint(self.second)
    }

    pub fn length(&self) -> f32 {
        self.vector().length()
    }

    pub fn point_of_cast(&self, mode: PointOfCastMode) -> Position {
        point_of_cast(mode, self.first, self.second)
    }
}

/// Receiver side of dispatch: a capability about to run its queued action
pub trait VectorTargetReceiver {
    fn receive_vector_target(&mut self, target: VectorTarget);
}

impl VectorTargetReceiver for Option<VectorTarget> {
    fn receive_vector_target(&mut self, target: VectorTarget) {
        *self = Some(target);
    }
}
