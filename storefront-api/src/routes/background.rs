/// Background-image endpoints
///
/// The background image is a singleton setting: PUT replaces it wholesale,
/// GET returns it or 404 when none has been set.
///
/// # Endpoints
///
/// - `PUT /background-image` - Set the background image URL
/// - `GET /background-image` - Get the background image URL

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::validate_request,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use storefront_shared::models::background_image::BackgroundImage;
use validator::Validate;

/// Background-image update request
#[derive(Debug, Deserialize, Validate)]
pub struct BackgroundImageRequest {
    /// Image URL
    #[serde(default)]
    #[validate(length(min = 1, message = "Image URL is required"))]
    pub url: String,
}

/// Background-image update response
#[derive(Debug, Serialize)]
pub struct BackgroundImageResponse {
    /// Human-readable message
    pub message: String,

    /// The stored URL
    pub url: String,
}

/// Sets the background image
///
/// # Endpoint
///
/// ```text
/// PUT /background-image
/// Content-Type: application/json
///
/// { "url": "https://cdn.example.com/bg.png" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing URL
pub async fn set_background_image(
    State(state): State<AppState>,
    Json(req): Json<BackgroundImageRequest>,
) -> ApiResult<Json<BackgroundImageResponse>> {
    validate_request(&req)?;

    let image = BackgroundImage::set(&state.db, &req.url).await?;

    Ok(Json(BackgroundImageResponse {
        message: "Image URL updated successfully".to_string(),
        url: image.url,
    }))
}

/// Gets the background image
///
/// # Endpoint
///
/// ```text
/// GET /background-image
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no image has been set
pub async fn get_background_image(
    State(state): State<AppState>,
) -> ApiResult<Json<BackgroundImage>> {
    let image = BackgroundImage::get(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("No image found".to_string()))?;

    Ok(Json(image))
}
