use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::ServiceError;
use crate::database::{AdFields, AdRecord, AdRepository, UserRepository};
use crate::filter::{ListParams, ListQuery};

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 1000;
pub const IMAGE_URL_MAX: usize = 255;

/// Client-supplied ad body for POST /ads and PUT /ads/:id. Missing fields
/// deserialize to empty values and are reported by `validate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: f64,
}

impl AdInput {
    pub fn validate(&self) -> Result<AdFields, ServiceError> {
        let title = self.title.trim();
        let description = self.description.trim();
        let image_url = self
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        check_length("title", title, TITLE_MIN, TITLE_MAX)?;
        check_length("description", description, DESCRIPTION_MIN, DESCRIPTION_MAX)?;
        if let Some(url) = image_url {
            if url.chars().count() > IMAGE_URL_MAX {
                return Err(ServiceError::validation(
                    "image_url",
                    format!("Image URL must be at most {} characters", IMAGE_URL_MAX),
                ));
            }
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ServiceError::validation(
                "price",
                "Price must be greater than zero",
            ));
        }

        Ok(AdFields {
            title: title.to_string(),
            description: description.to_string(),
            image_url: image_url.map(str::to_string),
            price: self.price,
        })
    }
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), ServiceError> {
    let length = value.chars().count();
    if length < min || length > max {
        return Err(ServiceError::validation(
            field,
            format!("{} must be between {} and {} characters", capitalize(field), min, max),
        ));
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct AdService {
    ads: Arc<dyn AdRepository>,
    users: Arc<dyn UserRepository>,
}

impl AdService {
    pub fn new(ads: Arc<dyn AdRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { ads, users }
    }

    pub async fn create(&self, owner: &str, input: &AdInput) -> Result<AdRecord, ServiceError> {
        let fields = input.validate()?;

        let user = self
            .users
            .find_by_username(owner)
            .await?
            .ok_or_else(|| ServiceError::OwnerMissing(owner.to_string()))?;

        let ad = self.ads.insert(user.id, &fields).await?;
        info!("User '{}' created ad {}", owner, ad.id);
        Ok(ad)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<AdRecord>, ServiceError> {
        let params = ListParams::from_query(query)?;
        debug!(
            "Listing ads page={} limit={} sort={} order={}",
            params.page,
            params.limit,
            params.sort.column(),
            params.order.to_sql()
        );
        Ok(self.ads.list(&params).await?)
    }

    pub async fn update(&self, id: i64, requestor: &str, input: &AdInput) -> Result<AdRecord, ServiceError> {
        self.owned_ad(id, requestor).await?;
        let fields = input.validate()?;

        let ad = self
            .ads
            .update(id, &fields)
            .await?
            .ok_or(ServiceError::AdNotFound(id))?;
        info!("User '{}' updated ad {}", requestor, id);
        Ok(ad)
    }

    pub async fn delete(&self, id: i64, requestor: &str) -> Result<(), ServiceError> {
        self.owned_ad(id, requestor).await?;

        if !self.ads.soft_delete(id).await? {
            return Err(ServiceError::AdNotFound(id));
        }
        info!("User '{}' deleted ad {}", requestor, id);
        Ok(())
    }

    /// Existence first, then ownership.
    async fn owned_ad(&self, id: i64, requestor: &str) -> Result<AdRecord, ServiceError> {
        let ad = self
            .ads
            .find_live(id)
            .await?
            .ok_or(ServiceError::AdNotFound(id))?;

        if !ad.is_owned_by(requestor) {
            warn!("User '{}' attempted to modify ad {} owned by '{}'", requestor, id, ad.username);
            return Err(ServiceError::NotOwner(id));
        }
        Ok(ad)
    }
}
