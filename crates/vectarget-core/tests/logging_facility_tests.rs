#![allow(clippy::unwrap_used, clippy::expect_used)]

use tracing::Level;
use vectarget_core::errors::VectorTargetError;
use vectarget_core::logging_facility::test_capture::init_test_capture;
use vectarget_core::model::{CapabilityConfig, PointOfCastMode};
use vectarget_core::ops::{dispatch_start, intercept_order};
use vectarget_core::vectarget_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use vectarget_core::{
    log_op_end, log_op_error, log_op_start, ActorId, CapabilityId, Command, Coordinator,
    Position, SessionId,
};

// Every test uses its own ids: the capture subscriber is process-global.

#[test]
fn test_log_op_start_and_end_macros() {
    let capture = init_test_capture();
    let op_name = "test_log_op_macros_unique_1";

    log_op_start!(op_name, sequence = 5);
    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let starts = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .count();
    let end = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");

    assert_eq!(starts, 1);
    assert_eq!(end.fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_records_stable_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_2";

    let err = VectorTargetError::QueueOverflow { capacity: 3 };
    log_op_error!(op_name, err, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let event = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .unwrap();
    assert_eq!(event.level, Level::ERROR);
    assert_eq!(
        event.fields.get("err_code"),
        Some(&"ERR_QUEUE_OVERFLOW".to_string())
    );
}

#[test]
fn test_interceptor_logs_decision() {
    let capture = init_test_capture();
    let session = SessionId::new(9101);
    let cap = CapabilityConfig::two_phase(CapabilityId::new(1), PointOfCastMode::Initial);
    let mut coord = Coordinator::new(4);

    let cmd = Command::cast_position(session, ActorId::new(1), cap.id, 3, Position::ZERO);
    intercept_order(&mut coord, &cmd, Some(&cap));

    let events = capture.events_with_field("session_id", "9101");
    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");
    assert_eq!(end.op.as_deref(), Some("intercept_order"));
    assert_eq!(end.fields.get("decision"), Some(&"suppress".to_string()));
}

#[test]
fn test_empty_dispatch_logs_error_event() {
    let capture = init_test_capture();
    let actor = ActorId::new(9202);
    let mut coord = Coordinator::new(4);

    assert!(dispatch_start(&mut coord, actor, CapabilityId::new(1)).is_err());

    let errors: Vec<_> = capture
        .events_with_field("actor_id", "9202")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, Level::ERROR);
    assert_eq!(
        errors[0].fields.get("err_code"),
        Some(&"ERR_EMPTY_QUEUE".to_string())
    );
}

#[test]
fn test_overflow_logs_warning() {
    let capture = init_test_capture();
    let actor = ActorId::new(9303);
    let cap = CapabilityConfig::two_phase(CapabilityId::new(1), PointOfCastMode::Initial);
    let mut coord = Coordinator::new(1);
    let session = SessionId::new(9303);

    for (seq, queued) in [(1, false), (2, false), (3, true), (4, false)] {
        let cmd = Command::cast_position(session, actor, cap.id, seq, Position::ZERO).queued(queued);
        intercept_order(&mut coord, &cmd, Some(&cap));
    }

    let warnings = capture
        .events_with_field("actor_id", "9303")
        .into_iter()
        .filter(|e| e.level == Level::WARN)
        .count();
    assert_eq!(warnings, 1);
}
