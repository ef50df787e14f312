//! Tests for domain error construction, trace capture and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("clash"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn try_from_error_dto_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_owned(),
        trace_id: None,
        details: None,
    };

    let error = TraceId::scope(trace_id, async move {
        Error::try_from(dto).expect("conversion succeeds for valid payload without trace")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn user_not_found_carries_reason_and_id() {
    let error = Error::user_not_found("alice");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.reason(), Some("user_not_found"));
    assert_eq!(
        error.details().and_then(|d| d.get("userId")),
        Some(&json!("alice"))
    );
}

#[rstest]
#[case(Error::invalid_content("too long"), "invalid_content")]
#[case(Error::invalid_follow_action("self"), "invalid_follow_action")]
fn validation_helpers_are_invalid_requests(#[case] error: Error, #[case] reason: &str) {
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.reason(), Some(reason));
}

#[rstest]
fn reason_is_absent_without_details(base_error: Error) {
    assert!(base_error.reason().is_none());
}

#[rstest]
fn serialises_camel_case_and_round_trips(expected_trace_id: String) {
    let error = Error::conflict("clash")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"code": "duplicate"}));

    let value = serde_json::to_value(&error).expect("error serialises");
    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "clash",
            "traceId": expected_trace_id,
            "details": {"code": "duplicate"},
        })
    );

    let back: Error = serde_json::from_value(value).expect("error deserialises");
    assert_eq!(back, error);
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let result = serde_json::from_value::<Error>(json!({
        "code": "not_found",
        "message": "  ",
    }));
    assert!(result.is_err());
}
