/// Authentication endpoints
///
/// This module provides the credential endpoints:
/// - Registration
/// - Login
/// - Password change
///
/// # Endpoints
///
/// - `POST /register` - Register a new account (or re-login an existing one)
/// - `POST /login` - Login and get a session token
/// - `POST /change-password` - Replace the stored password
///
/// # The registration quirk
///
/// Registering an email that already has an account does NOT fail with a
/// conflict: the account's login flag is set and a fresh token is issued,
/// exactly as the deployed contract behaves. Only a previously unseen email
/// creates an account.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::validate_request,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use storefront_shared::{
    auth::{jwt, password},
    models::account::{Account, CreateAccount},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
///
/// Required fields default to empty so an absent field surfaces as the
/// same 400 a present-but-empty one does.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password, stored as an Argon2id hash
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Success indicator
    pub success: bool,

    /// Human-readable message
    pub message: String,

    /// Session token
    #[serde(rename = "accessToken")]
    pub access_token: String,

    /// Account ID
    pub id: Uuid,

    /// Account email
    pub email: String,

    /// Account image URL, if any
    pub image: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Password; an absent password simply fails verification
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Success indicator
    pub success: bool,

    /// Human-readable message
    pub message: String,

    /// Session token
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Current password, verified against the stored hash
    #[serde(default, rename = "currentPassword")]
    pub current_password: String,

    /// Replacement password
    #[serde(default, rename = "newPassword")]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Password change response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

/// Issues a session token bound to an account
///
/// Shared by the credential and payment handlers; claims carry the account
/// id, email, and role, with the configured expiry.
pub(crate) fn issue_token(state: &AppState, account: &Account) -> Result<String, ApiError> {
    let claims = jwt::Claims::for_account(account, state.token_expiry());
    Ok(jwt::create_token(&claims, state.jwt_secret())?)
}

/// Registration endpoint
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Response
///
/// `201 Created` for both branches — a fresh account and the re-login of an
/// existing one:
///
/// ```json
/// {
///   "success": true,
///   "message": "User registered successfully!",
///   "accessToken": "eyJ...",
///   "id": "uuid",
///   "email": "user@example.com",
///   "image": null
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing email or password
/// - `500 Internal Server Error`: store or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    validate_request(&req)?;

    // An already-registered email re-enters as a login and gets a fresh
    // token instead of a conflict.
    if Account::find_by_email(&state.db, &req.email).await?.is_some() {
        let account = Account::mark_logged_in(&state.db, &req.email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let access_token = issue_token(&state, &account)?;

        return Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                success: true,
                message: "User registered successfully!".to_string(),
                access_token,
                id: account.id,
                email: account.email,
                image: account.image,
            }),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let account = Account::create(
        &state.db,
        CreateAccount {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let access_token = issue_token(&state, &account)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully!".to_string(),
            access_token,
            id: account.id,
            email: account.email,
            image: account.image,
        }),
    ))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "secret"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing email
/// - `404 Not Found`: no account for the email
/// - `401 Unauthorized`: password does not match
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    validate_request(&req)?;

    let account = Account::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".to_string()))?;

    let valid = password::verify_password(&req.password, &account.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials!".to_string()));
    }

    let access_token = issue_token(&state, &account)?;

    Ok(Json(LoginResponse {
        success: true,
        message: "User successfully logged in!".to_string(),
        access_token,
    }))
}

/// Password change endpoint
///
/// # Endpoint
///
/// ```text
/// POST /change-password
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "currentPassword": "secret",
///   "newPassword": "new-secret"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field
/// - `404 Not Found`: no account for the email
/// - `401 Unauthorized`: current password does not match
pub async fn change_password(
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    validate_request(&req)?;

    let account = Account::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let valid = password::verify_password(&req.current_password, &account.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let new_hash = password::hash_password(&req.new_password)?;
    Account::update_password(&state.db, &account.email, &new_hash).await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}
