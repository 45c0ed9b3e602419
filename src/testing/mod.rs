//! In-memory repositories so services and the router can be exercised without
//! Postgres.

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::{AdFields, AdRecord, AdRepository, DatabaseError, User, UserRepository};
use crate::filter::{ListParams, SortDirection, SortField};

#[derive(Clone)]
struct StoredAd {
    record: AdRecord,
    deleted: bool,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    ads: Vec<StoredAd>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.clone())
    }

    pub fn ads(&self) -> Arc<dyn AdRepository> {
        Arc::new(MemoryAds(self.clone()))
    }

    /// Inserts a user with an unusable password hash.
    pub async fn add_user(&self, username: &str) -> User {
        UserRepository::insert(self, username, "!")
            .await
            .expect("seed user")
    }

    pub async fn ad_count_including_deleted(&self) -> usize {
        self.inner.read().await.ads.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == username) {
            return Err(DatabaseError::UniqueViolation(username.to_string()));
        }
        let user = User {
            id: inner.users.len() as i64 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

struct MemoryAds(MemoryStore);

fn compare(a: &AdRecord, b: &AdRecord, sort: SortField) -> Ordering {
    let primary = match sort {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Title => a.title.cmp(&b.title),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl AdRepository for MemoryAds {
    async fn insert(&self, owner_id: i64, fields: &AdFields) -> Result<AdRecord, DatabaseError> {
        let mut inner = self.0.inner.write().await;
        let owner = inner
            .users
            .iter()
            .find(|u| u.id == owner_id)
            .ok_or(DatabaseError::Sqlx(sqlx::Error::RowNotFound))?
            .username
            .clone();
        let now = Utc::now();
        let record = AdRecord {
            id: inner.ads.len() as i64 + 1,
            title: fields.title.clone(),
            description: fields.description.clone(),
            image_url: fields.image_url.clone(),
            price: fields.price,
            user_id: owner_id,
            username: owner,
            created_at: now,
            updated_at: now,
        };
        inner.ads.push(StoredAd {
            record: record.clone(),
            deleted: false,
        });
        Ok(record)
    }

    async fn find_live(&self, id: i64) -> Result<Option<AdRecord>, DatabaseError> {
        let inner = self.0.inner.read().await;
        Ok(inner
            .ads
            .iter()
            .find(|ad| ad.record.id == id && !ad.deleted)
            .map(|ad| ad.record.clone()))
    }

    async fn list(&self, params: &ListParams) -> Result<Vec<AdRecord>, DatabaseError> {
        let inner = self.0.inner.read().await;
        let mut live: Vec<AdRecord> = inner
            .ads
            .iter()
            .filter(|ad| !ad.deleted)
            .map(|ad| ad.record.clone())
            .collect();

        live.sort_by(|a, b| match params.order {
            SortDirection::Asc => compare(a, b, params.sort),
            SortDirection::Desc => compare(b, a, params.sort),
        });

        Ok(live
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit as usize)
            .collect())
    }

    async fn update(&self, id: i64, fields: &AdFields) -> Result<Option<AdRecord>, DatabaseError> {
        let mut inner = self.0.inner.write().await;
        let Some(ad) = inner
            .ads
            .iter_mut()
            .find(|ad| ad.record.id == id && !ad.deleted)
        else {
            return Ok(None);
        };
        ad.record.title = fields.title.clone();
        ad.record.description = fields.description.clone();
        ad.record.image_url = fields.image_url.clone();
        ad.record.price = fields.price;
        ad.record.updated_at = Utc::now();
        Ok(Some(ad.record.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut inner = self.0.inner.write().await;
        match inner
            .ads
            .iter_mut()
            .find(|ad| ad.record.id == id && !ad.deleted)
        {
            Some(ad) => {
                ad.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
