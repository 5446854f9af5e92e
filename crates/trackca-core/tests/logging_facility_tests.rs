#![allow(clippy::unwrap_used, clippy::expect_used)]

use trackca_core::errors::{ExError, ExErrorKind, TrackCaError};
use trackca_core::logging_facility::test_capture::init_test_capture;
use trackca_core::model::ItemId;
use trackca_core::{log_op_end, log_op_error, log_op_start};
use trackca_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use trackca_core_types::EventId;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field_u64("duration_ms"), Some(42));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = TrackCaError::UnknownItem {
        item_id: ItemId::new(4),
        n_items: 2,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get("err_code"),
        Some(&"ERR_UNKNOWN_ITEM".to_string())
    );
    assert_eq!(
        error_event.fields.get("err_kind"),
        Some(&"UnknownItem".to_string())
    );
}

#[test]
fn test_log_macros_pass_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, event_id = "evt-7", n_items = 12usize);

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(start_event.fields.get("event_id"), Some(&"evt-7".to_string()));
    assert_eq!(start_event.field_u64("n_items"), Some(12));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_boundary_pairs_counted_per_op() {
    let capture = init_test_capture();
    let op1_name = "test_count_events_relax_unique_5";
    let op2_name = "test_count_events_follow_unique_5";

    log_op_start!(op1_name);
    log_op_start!(op2_name);
    log_op_end!(op1_name, duration_ms = 10);

    let start_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_START)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });
    let end_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_END)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });

    assert_eq!(start_count, 2);
    assert_eq!(end_count, 1);
}

#[test]
fn test_logged_code_matches_conversion() {
    let capture = init_test_capture();
    let op_name = "test_error_conversion_unique_6";

    let err = TrackCaError::BudgetExceeded {
        what: "paths",
        limit: 5,
        found: 6,
    };
    log_op_error!(op_name, err.clone(), duration_ms = 5);

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::BudgetExceeded);
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some(op_name)
            && e.fields.get("err_code").map(String::as_str) == Some(ex_err.code())),
        1
    );
}

#[test]
fn test_log_op_error_renders_operation_and_event() {
    let capture = init_test_capture();
    let op_name = "op_err_ctx_unique_7";

    let err = ExError::from(TrackCaError::Internal {
        message: "stalled".to_string(),
    })
    .with_event_id(EventId::from_string("evt-ctx-7".to_string()));
    log_op_error!(op_name, err, duration_ms = 1);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get("err").map(String::as_str),
        Some("[ERR_INTERNAL] in operation 'op_err_ctx_unique_7': stalled (event: evt-ctx-7)")
    );
}
