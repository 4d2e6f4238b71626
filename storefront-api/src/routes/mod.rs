/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, and password change
/// - `payments`: Payment submission, admin listing, and soft delete
/// - `background`: The singleton background-image setting

pub mod auth;
pub mod background;
pub mod health;
pub mod payments;

use crate::error::ApiError;
use validator::Validate;

/// Validates a request body, mapping the first failure to a 400
///
/// The request types mark required fields with `validator` attributes;
/// a missing or empty field surfaces as `BadRequest` with that field's
/// message.
pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        let message = e
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| errors.iter())
            .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        ApiError::BadRequest(message)
    })
}
