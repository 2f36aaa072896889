use vectarget_core::catalog::CapabilityCatalog;
use vectarget_core::model::{CapabilityConfig, OrderKind, PointOfCastMode, PresentationParameters};
use vectarget_core::{ActorId, CapabilityId, Command, Coordinator, Position, SessionId};

pub const SESSION: SessionId = SessionId::new(0);
pub const ACTOR: ActorId = ActorId::new(100);
pub const CAP: CapabilityId = CapabilityId::new(7);

/// Catalog with one two-phase capability `CAP` using `mode`
#[allow(dead_code)]
pub fn catalog(mode: PointOfCastMode) -> CapabilityCatalog {
    let mut catalog = CapabilityCatalog::new();
    let presentation =
        PresentationParameters::new().with("effect", serde_json::json!("particles/vector_arrow"));
    catalog
        .insert(CapabilityConfig::two_phase(CAP, mode).with_presentation(presentation))
        .unwrap();
    catalog
}

/// Coordinator whose queues hold `capacity` entries
#[allow(dead_code)]
pub fn coordinator(capacity: usize) -> Coordinator {
    Coordinator::new(capacity)
}

#[allow(dead_code)]
pub fn point(x: f32, y: f32) -> Position {
    Position::new(x, y, 0.0)
}

/// Cast-position order of `CAP` by `ACTOR` from `SESSION`
#[allow(dead_code)]
pub fn cast(sequence: i64, at: Position) -> Command {
    Command::cast_position(SESSION, ACTOR, CAP, sequence, at)
}

/// Plain move order for `ACTOR` from `SESSION`
#[allow(dead_code)]
pub fn move_order(sequence: i64) -> Command {
    let mut cmd = Command::plain(SESSION, vec![ACTOR], OrderKind::MoveToPosition, sequence);
    cmd.position = point(50.0, 50.0);
    cmd
}
