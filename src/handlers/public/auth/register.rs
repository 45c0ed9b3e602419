// handlers/public/auth/register.rs - POST /register handler

use axum::extract::State;

use crate::api::ApiJson;
use crate::database::PublicUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Credentials;
use crate::state::AppState;

/// POST /register - Register new user account
///
/// Input: `{"username": "alice", "password": "secret1"}`. Both are trimmed;
/// the username must be 3-30 characters without spaces, the password at least
/// 6 characters.
///
/// Output (201): `{"id": 1, "username": "alice"}`
///
/// Errors: 400 invalid input, 409 username taken.
pub async fn register_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Credentials>,
) -> ApiResult<PublicUser> {
    let user = state.credentials.register(&payload).await?;
    Ok(ApiResponse::created(user))
}
