//! Field-level validation failures collected before a use case runs.

use serde::Serialize;
use serde_json::json;

use super::Error;

/// Message shared by every field-validation failure.
pub const VALIDATION_FAILED_MESSAGE: &str = "Erro de validação nos campos";

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FieldViolation {
    /// Client-facing field name.
    pub field: String,
    /// Human-readable reason the value was rejected.
    pub message: String,
}

impl FieldViolation {
    /// Build a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulator for field violations.
///
/// Violations are always exposed sorted by field then message so clients see
/// a deterministic order regardless of which check ran first.
///
/// # Examples
/// ```
/// use voting_backend::domain::FieldViolations;
///
/// let mut violations = FieldViolations::default();
/// violations.push("title", "O título é obrigatório.");
/// violations.push("description", "A descrição é obrigatória.");
///
/// let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
/// assert_eq!(fields, ["description", "title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldViolations(Vec<FieldViolation>);

impl FieldViolations {
    /// Record a violation, keeping the collection sorted.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let violation = FieldViolation::new(field, message);
        let index = self.0.partition_point(|existing| existing <= &violation);
        self.0.insert(index, violation);
    }

    /// Merge another set of violations.
    pub fn extend(&mut self, other: FieldViolations) {
        for violation in other.0 {
            self.push(violation.field, violation.message);
        }
    }

    /// True when no violation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the sorted violations.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    /// `Ok(())` when empty, otherwise the violations as an error.
    pub fn into_result(self) -> Result<(), FieldViolations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldViolation> for FieldViolations {
    fn from(value: FieldViolation) -> Self {
        Self(vec![value])
    }
}

impl From<FieldViolations> for Error {
    fn from(value: FieldViolations) -> Self {
        Error::invalid_request(VALIDATION_FAILED_MESSAGE).with_details(json!({
            "errors": value.0,
        }))
    }
}
