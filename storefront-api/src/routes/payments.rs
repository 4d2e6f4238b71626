/// Payment endpoints
///
/// This module provides:
/// - the transactional payment submission (the only handler with a
///   correctness contract beyond plain CRUD: both writes commit or neither
///   does)
/// - the admin-gated listing of stored cards
/// - soft deletion of a stored card
/// - the public listing of active cards
///
/// # Endpoints
///
/// - `POST /payment` - Submit a payment
/// - `POST /paymentData` - List stored cards (admin only)
/// - `PATCH /paymentData` - Mark a stored card deleted
/// - `GET /active-payments` - List active cards

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::validate_request,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use storefront_shared::{
    auth::authorization::require_admin,
    models::{
        account::Account,
        payment_method::{CardDetails, PaymentMethod},
    },
    payments,
};
use uuid::Uuid;
use validator::Validate;

/// Payment submission request
///
/// The card fields are opaque strings and are stored without format
/// validation; only the email is required.
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentRequest {
    /// Email of the paying account
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Card fields, flattened into the request body
    #[serde(flatten)]
    pub card: CardDetails,
}

/// Payment submission response
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Success indicator
    pub success: bool,

    /// Human-readable message
    pub message: String,

    /// Session token bound to the updated account
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Admin listing request
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentDataRequest {
    /// Email of the requesting account; must resolve to an admin
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Card listing response
#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    /// Success indicator
    pub success: bool,

    /// Number of records returned
    #[serde(rename = "totalCount")]
    pub total_count: usize,

    /// Active card records, deletion flag excluded
    pub data: Vec<PaymentMethod>,
}

/// Soft-delete request
#[derive(Debug, Deserialize, Validate)]
pub struct SoftDeleteRequest {
    /// ID of the card record to mark deleted
    #[serde(default)]
    #[validate(length(min = 1, message = "ID is required"))]
    pub id: String,
}

/// Status response for the soft-delete endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Success indicator
    pub success: bool,

    /// Human-readable message
    pub message: String,
}

/// Payment submission endpoint
///
/// Marks the account as paying and stores the submitted card in one store
/// transaction; on success a fresh session token bound to the updated
/// account is returned.
///
/// # Endpoint
///
/// ```text
/// POST /payment
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "number": "4111111111111111",
///   "expiryDate": "12/26",
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "check": "123",
///   "billingAddress": "1 Analytical Way"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing email
/// - `404 Not Found`: no account for the email; nothing is written
/// - `500 Internal Server Error`: the store failed to commit the pair of
///   writes, underlying cause attached
pub async fn submit_payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    validate_request(&req)?;

    let account = payments::submit_payment(&state.db, &req.email, req.card).await?;

    let access_token = super::auth::issue_token(&state, &account)?;

    Ok(Json(PaymentResponse {
        success: true,
        message: "Payment successfully processed!".to_string(),
        access_token,
    }))
}

/// Admin listing endpoint
///
/// Resolves the requesting account by email and requires the admin role;
/// every other role gets 403 regardless of payment state. Returns records
/// whose deletion flag is false or absent.
///
/// # Endpoint
///
/// ```text
/// POST /paymentData
/// Content-Type: application/json
///
/// { "email": "admin@example.com" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing email
/// - `404 Not Found`: no account for the email
/// - `403 Forbidden`: account is not an admin
pub async fn list_payment_data(
    State(state): State<AppState>,
    Json(req): Json<PaymentDataRequest>,
) -> ApiResult<Json<PaymentListResponse>> {
    validate_request(&req)?;

    let account = Account::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    require_admin(&account)?;

    let data = PaymentMethod::list_active(&state.db).await?;

    Ok(Json(PaymentListResponse {
        success: true,
        total_count: data.len(),
        data,
    }))
}

/// Soft-delete endpoint
///
/// Marks a card record deleted. Re-deleting an already-deleted record
/// succeeds; the operation is idempotent by policy.
///
/// # Endpoint
///
/// ```text
/// PATCH /paymentData
/// Content-Type: application/json
///
/// { "id": "uuid" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing or malformed id
/// - `404 Not Found`: no record with the id
pub async fn soft_delete_payment_method(
    State(state): State<AppState>,
    Json(req): Json<SoftDeleteRequest>,
) -> ApiResult<Json<StatusResponse>> {
    validate_request(&req)?;

    let id = Uuid::parse_str(&req.id)
        .map_err(|_| ApiError::BadRequest("Invalid payment method id".to_string()))?;

    PaymentMethod::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Data not found".to_string()))?;

    PaymentMethod::soft_delete(&state.db, id).await?;

    Ok(Json(StatusResponse {
        success: true,
        message: "Data successfully marked as deleted".to_string(),
    }))
}

/// Public listing endpoint
///
/// Same projection as the admin listing, without the role gate.
///
/// # Endpoint
///
/// ```text
/// GET /active-payments
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: store failure
pub async fn list_active_payments(
    State(state): State<AppState>,
) -> ApiResult<Json<PaymentListResponse>> {
    let data = PaymentMethod::list_active(&state.db).await?;

    Ok(Json(PaymentListResponse {
        success: true,
        total_count: data.len(),
        data,
    }))
}
