//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Every failure renders as [`ErrorBody`]; validation failures also
//! carry the sorted field errors.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::Utc;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::schemas::{ErrorBody, FieldErrorBody};
use crate::middleware::RequestPath;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent instead of the details of an internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno no servidor.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn field_errors(details: Option<&Value>) -> Option<Vec<FieldErrorBody>> {
    let errors = details?.get("errors")?.clone();
    match serde_json::from_value(errors) {
        Ok(errors) => Some(errors),
        Err(err) => {
            warn!(error = %err, "discarding malformed field error details");
            None
        }
    }
}

/// Render `error` as the response body for a request to `path`.
pub(crate) fn error_body(error: &Error, status: StatusCode, path: String) -> ErrorBody {
    let message = if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_ERROR_MESSAGE.to_owned()
    } else {
        error.message().to_owned()
    };

    ErrorBody {
        timestamp: Utc::now(),
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or_default().to_owned(),
        message,
        path,
        errors: field_errors(error.details()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = ?self.code(),
                message = self.message(),
                trace_id = self.trace_id().unwrap_or_default(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        let path = RequestPath::current().unwrap_or_default();
        builder.json(error_body(self, status, path))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
