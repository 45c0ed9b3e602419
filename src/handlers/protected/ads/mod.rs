// handlers/protected/ads/mod.rs - Ad management handlers
//
// Every handler here runs after `require_auth`, so `AuthUser` is always present.

use crate::error::ApiError;

pub mod create; // POST /ads
pub mod delete; // DELETE /ads/:id
pub mod list;   // GET /ads
pub mod update; // PUT /ads/:id

pub use create::ads_create;
pub use delete::ads_delete;
pub use list::ads_list;
pub use update::ads_update;

/// Parse the `:id` path segment.
pub(crate) fn parse_ad_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!("Invalid ad id: {}", raw))),
    }
}
