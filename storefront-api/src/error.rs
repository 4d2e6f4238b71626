/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts into the
/// matching status code with a `{"success": false, "message": "..."}` body.
///
/// # Taxonomy
///
/// - `BadRequest` (400): missing or malformed required field
/// - `Unauthorized` (401): bad credential
/// - `Forbidden` (403): authenticated but insufficient role
/// - `NotFound` (404): entity absent
/// - `TransactionFailure` (500): store-level commit/abort error, underlying
///   cause attached for diagnostics
/// - `InternalError` (500): anything unanticipated
///
/// There is no local recovery: every failure surfaces directly as an HTTP
/// status, and nothing here retries.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_shared::auth::authorization::AuthzError;
use storefront_shared::auth::jwt::JwtError;
use storefront_shared::auth::password::PasswordError;
use storefront_shared::payments::PaymentError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Store transaction failure (500), with the underlying cause
    TransactionFailure(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
///
/// `success` is always false here; handlers produce their own success
/// bodies.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::TransactionFailure(msg) => write!(f, "Transaction failure: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// The status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TransactionFailure(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => msg,
            ApiError::TransactionFailure(cause) => {
                tracing::error!("Transaction failure: {}", cause);
                format!("Internal server error: {}", cause)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                format!("Internal server error: {}", msg)
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert payment-flow errors to API errors
impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::AccountNotFound => ApiError::NotFound("User not found".to_string()),
            PaymentError::TransactionFailure(cause) => {
                ApiError::TransactionFailure(cause.to_string())
            }
        }
    }
}

/// Convert authorization errors to API errors
impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotAdmin => ApiError::Forbidden("Unauthorized access".to_string()),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert token errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::CreateError(msg) => {
                ApiError::InternalError(format!("Token creation failed: {}", msg))
            }
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Email is required".to_string());
        assert_eq!(err.to_string(), "Bad request: Email is required");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized(String::new()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden(String::new()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound(String::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::TransactionFailure(String::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_payment_error_mapping() {
        let err: ApiError = PaymentError::AccountNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = PaymentError::TransactionFailure(sqlx::Error::PoolClosed).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_authz_error_mapping() {
        let err: ApiError = AuthzError::NotAdmin.into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_transaction_failure_keeps_cause() {
        let err = ApiError::TransactionFailure("pool timed out".to_string());
        assert!(err.to_string().contains("pool timed out"));
    }
}
