// handlers/protected/ads/list.rs - GET /ads handler

use axum::extract::State;

use crate::api::{AdView, ApiQuery};
use crate::filter::ListQuery;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /ads?page&limit&sort&order - One page of live ads
///
/// Defaults: page=1, limit=10 (max 100), sort=created_at (or price, title),
/// order=DESC. No total count is returned; a page shorter than `limit` is the
/// last one.
pub async fn ads_list(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Vec<AdView>> {
    let ads = state.ads.list(&query).await?;
    Ok(ApiResponse::success(ads.into_iter().map(AdView::from).collect()))
}
