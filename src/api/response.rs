//! Response types for the payroll API.
//!
//! This module defines the error body returned by every endpoint and its
//! mapping from [`EngineError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};
use crate::models::PayrollId;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// 400 with a validation error body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }

    /// 401 for a missing or unreadable identity.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("UNAUTHORIZED", message),
        }
    }

    /// 403 for an identity without the required role.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: ApiError::new("FORBIDDEN", message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn error_code(error: &EngineError) -> &'static str {
    match error {
        EngineError::NotFound { .. } => "NOT_FOUND",
        EngineError::AlreadyCheckedIn { .. } => "ALREADY_CHECKED_IN",
        EngineError::AlreadyCheckedOut { .. } => "ALREADY_CHECKED_OUT",
        EngineError::AlreadyApproved { .. } => "ALREADY_APPROVED",
        EngineError::AlreadyRolled { .. } => "ALREADY_ROLLED",
        EngineError::WeekendNotAllowed { .. } => "WEEKEND_NOT_ALLOWED",
        EngineError::CannotCheckOut { .. } => "CANNOT_CHECK_OUT",
        EngineError::SubmitBeforeCheckout { .. } => "SUBMIT_BEFORE_CHECKOUT",
        EngineError::ExceedsLimit { .. } => "EXCEEDS_LIMIT",
        EngineError::NotRolled { .. } => "NOT_ROLLED",
        EngineError::UserInfoMissing { .. } => "USER_INFO_MISSING",
        EngineError::InvalidInput { .. } => "VALIDATION_ERROR",
        EngineError::CalculationError { .. } => "CALCULATION_ERROR",
        EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::ConfigInvalid { .. } => "CONFIG_ERROR",
        EngineError::Storage(_) => "STORAGE_ERROR",
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = match error.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::PreconditionFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Calculation | ErrorKind::Config | ErrorKind::Storage => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let error = match &error {
            EngineError::InvalidInput { field, message } => ApiError::with_details(
                error_code(&error),
                error.to_string(),
                format!("Field '{}' {}", field, message),
            ),
            EngineError::Storage(_) | EngineError::CalculationError { .. } => {
                ApiError::with_details(error_code(&error), "Internal error", error.to_string())
            }
            _ => ApiError::new(error_code(&error), error.to_string()),
        };

        ApiErrorResponse { status, error }
    }
}

/// Body of `GET /payrolls/:id/take-home-pay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeHomePayResponse {
    /// The rolled period.
    pub payroll_id: PayrollId,
    /// Sum of every employee's take-home pay.
    pub total_take_home_pay: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_status_follows_error_kind() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        let cases = [
            (EngineError::not_found("payroll", 3), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                EngineError::AlreadyCheckedIn { date },
                StatusCode::CONFLICT,
                "ALREADY_CHECKED_IN",
            ),
            (
                EngineError::WeekendNotAllowed { date },
                StatusCode::UNPROCESSABLE_ENTITY,
                "WEEKEND_NOT_ALLOWED",
            ),
            (
                EngineError::invalid_input("amount", "must be greater than zero"),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                EngineError::Storage(StoreError::Poisoned("payroll")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_invalid_input_carries_field_details() {
        let response: ApiErrorResponse =
            EngineError::invalid_input("amount", "must be greater than zero").into();
        assert_eq!(
            response.error.details.as_deref(),
            Some("Field 'amount' must be greater than zero")
        );
    }
}
