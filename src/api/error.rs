//! API error handling.
//!
//! This module maps service outcomes onto status codes and JSON error bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::application::ServiceError;
use crate::domain::TaskRuleViolation;

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional field-level errors for validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error with field-level details.
    #[must_use]
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Field-level error for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<&TaskRuleViolation> for FieldError {
    fn from(violation: &TaskRuleViolation) -> Self {
        Self::new(violation.field(), violation.to_string())
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// Creates a 400 Bad Request response for validation errors.
    ///
    /// The top-level message is the first field message, so clients that only
    /// read `message` still see the reason.
    #[must_use]
    pub fn validation_error(details: Vec<FieldError>) -> Self {
        let message = details
            .first()
            .map_or_else(|| "Validation failed".to_string(), |detail| detail.message.clone());
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::validation(message, details),
        )
    }

    /// Creates a 400 Bad Request response for a redundant completion.
    #[must_use]
    pub fn already_completed(message: impl Into<String>) -> Self {
        Self::bad_request("ALREADY_COMPLETED", message)
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation(violation) => {
                Self::validation_error(vec![FieldError::from(&violation)])
            }
            ServiceError::NotFound(_) => Self::not_found("Task not found"),
            ServiceError::Conflict(violation) => Self::already_completed(violation.to_string()),
            // Store details are logged by the service and never returned.
            ServiceError::Store(_) => Self::internal_error("An internal error occurred"),
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("INVALID_BODY", rejection.body_text())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use crate::infrastructure::RepositoryError;
    use rstest::rstest;

    #[rstest]
    fn test_api_error_validation() {
        let details = vec![FieldError::new("title", "Title is required")];
        let error = ApiError::validation("Title is required", details);
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.map(|details| details.len()), Some(1));
    }

    #[rstest]
    fn test_validation_error_uses_first_detail_message() {
        let response =
            ApiErrorResponse::validation_error(vec![FieldError::new("title", "Title is required")]);
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.message, "Title is required");
    }

    #[rstest]
    #[case(
        ServiceError::Validation(TaskRuleViolation::MissingTitle),
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR"
    )]
    #[case(
        ServiceError::NotFound(TaskId::generate()),
        StatusCode::NOT_FOUND,
        "NOT_FOUND"
    )]
    #[case(
        ServiceError::Conflict(TaskRuleViolation::AlreadyCompleted),
        StatusCode::BAD_REQUEST,
        "ALREADY_COMPLETED"
    )]
    #[case(
        ServiceError::Store(RepositoryError::DatabaseError("connection reset".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR"
    )]
    fn test_service_error_mapping(
        #[case] error: ServiceError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let response = ApiErrorResponse::from(error);
        assert_eq!(response.status, status);
        assert_eq!(response.error.code, code);
    }

    #[rstest]
    fn test_store_error_hides_details() {
        let response = ApiErrorResponse::from(ServiceError::Store(
            RepositoryError::DatabaseError("password=hunter2".to_string()),
        ));
        assert!(!response.error.message.contains("hunter2"));
    }

    #[rstest]
    fn test_conflict_message_is_readable() {
        let response =
            ApiErrorResponse::from(ServiceError::Conflict(TaskRuleViolation::AlreadyCompleted));
        assert_eq!(response.error.message, "Task is already completed");
    }
}
