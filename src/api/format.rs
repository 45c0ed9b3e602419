use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::database::{AdRecord, PublicUser};

/// Public wire format of an ad:
/// `{id, title, description, image_url, price, created_at, updated_at, user: {id, username}}`
#[derive(Debug, Clone, Serialize)]
pub struct AdView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: f64,
    #[serde(serialize_with = "rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "rfc3339")]
    pub updated_at: DateTime<Utc>,
    pub user: PublicUser,
}

impl From<AdRecord> for AdView {
    fn from(record: AdRecord) -> Self {
        let user = record.owner();
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            image_url: record.image_url,
            price: record.price,
            created_at: record.created_at,
            updated_at: record.updated_at,
            user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenView {
    pub token: String,
    pub expires_in: i64,
}

// `+00:00` rather than `Z`, so every timestamp carries an explicit offset
fn rfc3339<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, false))
}
