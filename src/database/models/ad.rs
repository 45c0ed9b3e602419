use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::user::PublicUser;

/// A live ad joined with its owner's username.
#[derive(Debug, Clone, FromRow)]
pub struct AdRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: f64,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdRecord {
    pub fn owner(&self) -> PublicUser {
        PublicUser {
            id: self.user_id,
            username: self.username.clone(),
        }
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }
}

/// Validated, trimmed ad fields shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct AdFields {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: f64,
}
