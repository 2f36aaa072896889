pub mod capability;
pub mod command;
pub mod params;
pub mod position;
pub mod selection;
pub mod vector_target;

pub use capability::{point_of_cast, CapabilityConfig, PointOfCastMode, VectorCapability};
pub use command::{Command, OrderKind};
pub use params::{DistanceBounds, PresentationParameters};
pub use position::Position;
pub use selection::{PendingSelection, QueueEntry};
pub use vector_target::{VectorTarget, VectorTargetReceiver};
