//! OpenAPI schema definitions for HTTP error payloads.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! error envelope rendered by [`crate::inbound::http::error`] lives here so the
//! same type documents and produces every failure response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorBody {
    /// Client-facing field name.
    #[schema(example = "title")]
    pub field: String,
    /// Why the value was rejected.
    #[schema(example = "O título é obrigatório.")]
    pub message: String,
}

/// Body returned for every failed request.
///
/// `errors` is only present for field-validation failures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Instant the error was rendered.
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    #[schema(example = 404)]
    pub status: u16,
    /// HTTP reason phrase.
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable message.
    #[schema(example = "Não foi possível encontrar pauta ativa com o ID informado.")]
    pub message: String,
    /// Request path.
    #[schema(example = "/api/v1/topic/list")]
    pub path: String,
    /// Field-level failures, sorted by field then message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldErrorBody>>,
}
