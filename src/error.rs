//! Custom error types and handling
//!
//! This module defines the field-level validation report produced by every
//! schema, the crate-wide error type, and their conversion to HTTP responses
//! for callers that sit behind an Axum layer.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidationErrors;

/// One violated rule on one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Field path, e.g. `email` or `items[2].nickname`
    pub field: String,
    pub message: String,
    /// The rejected input, echoed back. `None` for redacted fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n  {}", self.field, self.message)?;
        if let Some(input) = &self.input {
            write!(f, " [input_value={}]", input)?;
        }
        Ok(())
    }
}

/// Every field error produced by a single construction attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub schema: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new(schema: &'static str) -> Self {
        Self {
            schema,
            errors: Vec::new(),
        }
    }

    /// Record a failure on `field`
    pub fn push(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        input: Option<Value>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
            input,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First error reported for `field`, if any
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Whether any error on any field carries `message`
    pub fn contains_message(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e.message == message)
    }

    /// Copy the errors of a nested record under `prefix`
    pub fn extend_nested(&mut self, prefix: &str, nested: ValidationReport) {
        for error in nested.errors {
            self.errors.push(FieldError {
                field: format!("{}.{}", prefix, error.field),
                ..error
            });
        }
    }

    /// Translate `validator` output, echoing each offending value from `input`.
    ///
    /// Fields listed in `redacted` never have their value echoed. Errors are
    /// ordered by position in `field_order`; unknown keys sort last.
    pub fn extend_from_validator(
        &mut self,
        errors: &ValidationErrors,
        input: &Map<String, Value>,
        field_order: &[&str],
        redacted: &[&str],
    ) {
        let mut collected = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            let echoed = if redacted.contains(&field.as_str()) {
                None
            } else {
                input.get(&field).cloned()
            };
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                collected.push(FieldError {
                    field: field.clone(),
                    message,
                    input: echoed.clone(),
                });
            }
        }

        let rank = |field: &str| {
            field_order
                .iter()
                .position(|f| *f == field)
                .unwrap_or(field_order.len())
        };
        collected.sort_by(|a, b| {
            rank(a.field.as_str())
                .cmp(&rank(b.field.as_str()))
                .then_with(|| a.field.cmp(&b.field))
        });
        self.errors.extend(collected);
    }

    /// First line of the rendered report
    pub fn summary(&self) -> String {
        let noun = if self.errors.len() == 1 {
            "error"
        } else {
            "errors"
        };
        format!("{} validation {} for {}", self.errors.len(), noun, self.schema)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for error in &self.errors {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(ValidationReport),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Json(_) => "INVALID_JSON",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidInput(_) | Self::Json(_) => StatusCode::BAD_REQUEST,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationReport> for AppError {
    fn from(report: ValidationReport) -> Self {
        AppError::Validation(report)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        let (message, details) = match &self {
            AppError::Validation(report) => {
                (report.summary(), serde_json::to_value(&report.errors).ok())
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ("An internal error occurred".to_string(), None)
            }
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_report() -> ValidationReport {
        let mut report = ValidationReport::new("UserBase");
        report.push(
            "email",
            "value is not a valid email address",
            Some(json!("john.doe.example.com")),
        );
        report.push("password", "Password must contain a number", None);
        report
    }

    #[test]
    fn test_report_display_echoes_input() {
        let rendered = sample_report().to_string();
        assert_eq!(
            rendered,
            "2 validation errors for UserBase\n\
             email\n  value is not a valid email address [input_value=\"john.doe.example.com\"]\n\
             password\n  Password must contain a number"
        );
    }

    #[test]
    fn test_report_lookup() {
        let report = sample_report();
        assert_eq!(report.len(), 2);
        assert!(report.contains_message("Password must contain a number"));
        assert!(report.field("nickname").is_none());
        assert_eq!(report.field("password").and_then(|e| e.input.clone()), None);
    }

    #[test]
    fn test_extend_nested_prefixes_paths() {
        let mut outer = ValidationReport::new("UserListResponse");
        outer.extend_nested("items[1]", sample_report());
        assert_eq!(outer.errors[0].field, "items[1].email");
        assert_eq!(outer.errors[1].field, "items[1].password");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::from(sample_report()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let io = AppError::from(std::io::Error::other("disk"));
        assert_eq!(io.error_code(), "IO_ERROR");
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_validation_response_body() {
        let response = AppError::from(sample_report()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "2 validation errors for UserBase");
        assert_eq!(body["error"]["details"][0]["field"], "email");
        assert_eq!(body["error"]["details"][0]["input"], "john.doe.example.com");
        assert!(body["error"]["details"][1].get("input").is_none());
    }
}
