// handlers/protected/ads/create.rs - POST /ads handler

use axum::extract::State;

use crate::api::{AdView, ApiJson};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::AdInput;
use crate::state::AppState;

/// POST /ads - Create an ad owned by the caller
///
/// Input: `{"title": "Bike", "description": "A red bike for sale", "image_url": null, "price": 120}`
///
/// Output (201): the ad with its owner nested under `user`.
pub async fn ads_create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<AdInput>,
) -> ApiResult<AdView> {
    let ad = state.ads.create(&user.username, &payload).await?;
    Ok(ApiResponse::created(AdView::from(ad)))
}
