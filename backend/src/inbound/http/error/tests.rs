//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, FieldViolations, VALIDATION_FAILED_MESSAGE};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(error: &Error) -> (StatusCode, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON deserialisation succeeds");
    (status, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn generic_body_carries_reason_and_message() {
    let (status, body) = body_of(&Error::conflict("Já existe uma pauta com o título informado.")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert_eq!(body["error"], "Conflict");
    assert_eq!(body["message"], "Já existe uma pauta com o título informado.");
    assert!(body["timestamp"].is_string());
    assert!(body.get("errors").is_none());
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("database password leaked in message")
        .with_details(json!({"secret": "x"}));

    let (_, body) = body_of(&error).await;

    assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    assert!(body.get("errors").is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_body_lists_sorted_field_errors() {
    let mut violations = FieldViolations::default();
    violations.push("title", "O título é obrigatório.");
    violations.push("description", "A descrição é obrigatória.");

    let (status, body) = body_of(&Error::from(violations)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], VALIDATION_FAILED_MESSAGE);
    assert_eq!(
        body["errors"],
        json!([
            {"field": "description", "message": "A descrição é obrigatória."},
            {"field": "title", "message": "O título é obrigatório."}
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn path_comes_from_request_scope() {
    let error = Error::not_found("missing");
    let (_, body) = RequestPath::scope("/api/v1/topic/abc", body_of(&error)).await;
    assert_eq!(body["path"], "/api/v1/topic/abc");
}

#[rstest]
fn trace_id_is_echoed_as_header() {
    let response = ResponseError::error_response(&Error::not_found("missing").with_trace_id(TRACE_ID));
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, TRACE_ID);
}

#[rstest]
fn actix_errors_become_internal() {
    let actix = actix_web::error::ErrorBadGateway("upstream");
    let error = Error::from(actix);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
}
