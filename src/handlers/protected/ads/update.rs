// handlers/protected/ads/update.rs - PUT /ads/:id handler

use axum::extract::{Path, State};

use super::parse_ad_id;
use crate::api::{AdView, ApiJson};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::AdInput;
use crate::state::AppState;

/// PUT /ads/:id - Overwrite title, description, image and price
///
/// 404 if the ad does not exist or was deleted, 403 if the caller is not the
/// owner, 400 on invalid fields. Owner and id never change.
pub async fn ads_update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<AdInput>,
) -> ApiResult<AdView> {
    let id = parse_ad_id(&id)?;
    let ad = state.ads.update(id, &user.username, &payload).await?;
    Ok(ApiResponse::success(AdView::from(ad)))
}
