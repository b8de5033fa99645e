//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and query values arrive as raw strings and are parsed here so every
//! failure names the client-facing field and lands in the validation body.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Error, FieldViolation, FieldViolations};

/// Message used when a request body is not valid JSON for the endpoint.
pub const MALFORMED_BODY_MESSAGE: &str = "O corpo da requisição está malformado.";
/// Message used when a query string cannot be decoded at all.
pub const MALFORMED_QUERY_MESSAGE: &str = "Os parâmetros da requisição estão malformados.";

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field(field: FieldName) -> FieldViolation {
    FieldViolation::new(field.as_str(), "O parâmetro é obrigatório.")
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, FieldViolation> {
    Uuid::parse_str(value)
        .map_err(|_| FieldViolation::new(field.as_str(), "Informe um UUID válido."))
}

pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, FieldViolation> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(missing_field(field)),
    }
}

/// Parse an optional integer, using `default` when absent.
pub(crate) fn parse_integer_or(
    value: Option<&str>,
    field: FieldName,
    default: i64,
) -> Result<i64, FieldViolation> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| FieldViolation::new(field.as_str(), "Informe um número inteiro válido.")),
    }
}

pub(crate) fn parse_bool(value: Option<String>, field: FieldName) -> Result<bool, FieldViolation> {
    let raw = require(value, field)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FieldViolation::new(
            field.as_str(),
            "Informe true ou false.",
        )),
    }
}

/// Record a failed parse and keep going, so all violations are reported
/// together.
pub(crate) fn record<T>(
    result: Result<T, FieldViolation>,
    violations: &mut FieldViolations,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.extend(violation.into());
            None
        }
    }
}

/// `JsonConfig` error handler rendering the generic error body.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected request body");
    Error::invalid_request(MALFORMED_BODY_MESSAGE).into()
}

/// `QueryConfig` error handler rendering the generic error body.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected query string");
    Error::invalid_request(MALFORMED_QUERY_MESSAGE).into()
}
