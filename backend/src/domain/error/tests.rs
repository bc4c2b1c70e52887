//! Tests for domain error construction, validation, and serialisation.

use super::*;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::not_found("User not found"), ErrorCode::NotFound)]
#[case(Error::upload_failed("store offline"), ErrorCode::UploadFailed)]
#[case(Error::service_unavailable("pool exhausted"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("   ");
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
    let error = TraceId::scope(trace_id, async move { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({"code": "not_found", "message": "missing"});

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("payload is valid")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(expected_trace_id: String) {
    let error = Error::invalid_request("Invalid userId: nope.")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "userId"}));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "Invalid userId: nope.",
            "traceId": expected_trace_id,
            "details": {"field": "userId"},
        })
    );

    let bare = serde_json::to_value(Error::upload_failed("store offline"))
        .expect("serialise bare error");
    assert_eq!(bare, json!({"code": "upload_failed", "message": "store offline"}));
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let result = serde_json::from_value::<Error>(json!({"code": "not_found", "message": " "}));
    assert!(result.is_err());
}

#[given("a well formed error payload")]
fn a_well_formed_error_payload() -> (ErrorCode, String) {
    (ErrorCode::NotFound, "Profile not found".to_owned())
}

#[given("a blank error message")]
fn a_blank_error_message() -> (ErrorCode, String) {
    (ErrorCode::NotFound, "  ".to_owned())
}

#[when("the error is constructed")]
fn the_error_is_constructed(payload: (ErrorCode, String)) -> Result<Error, ErrorValidationError> {
    Error::try_new(payload.0, payload.1)
}

#[then("construction succeeds with the supplied message")]
fn construction_succeeds(result: Result<Error, ErrorValidationError>) {
    let error = result.expect("construction should succeed");
    assert_eq!(error.message(), "Profile not found");
}

#[then("construction fails with an empty message")]
fn construction_fails_with_empty_message(result: Result<Error, ErrorValidationError>) {
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn constructing_an_error_happy_path() {
    let result = the_error_is_constructed(a_well_formed_error_payload());
    construction_succeeds(result);
}

#[rstest]
fn constructing_an_error_unhappy_path() {
    let result = the_error_is_constructed(a_blank_error_message());
    construction_fails_with_empty_message(result);
}
