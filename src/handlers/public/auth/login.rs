// handlers/public/auth/login.rs - POST /login handler

use axum::extract::State;

use crate::api::{ApiJson, TokenView};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Credentials;
use crate::state::AppState;

/// POST /login - Authenticate user and receive JWT token
///
/// Input: `{"username": "alice", "password": "secret1"}`
///
/// Output (200): `{"token": "eyJhbGciOiJIUzI1NiI...", "expires_in": 86400}`
///
/// Errors: 400 missing fields, 401 bad credentials. Unknown usernames and
/// wrong passwords produce the same 401.
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Credentials>,
) -> ApiResult<TokenView> {
    let user = state.credentials.authenticate(&payload).await?;
    let token = state.tokens.issue(&user.username)?;

    tracing::info!("User '{}' logged in", user.username);
    Ok(ApiResponse::success(TokenView {
        token,
        expires_in: state.tokens.lifetime().num_seconds(),
    }))
}
