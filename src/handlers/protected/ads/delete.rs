// handlers/protected/ads/delete.rs - DELETE /ads/:id handler

use axum::extract::{Path, State};

use super::parse_ad_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// DELETE /ads/:id - Soft delete; 204 on success
pub async fn ads_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_ad_id(&id)?;
    state.ads.delete(id, &user.username).await?;
    Ok(ApiResponse::no_content())
}
