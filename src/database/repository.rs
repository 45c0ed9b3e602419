use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{AdFields, AdRecord, User};
use crate::filter::{FilterOrder, ListParams};

/// Credential storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `UniqueViolation` when the username is already taken.
    async fn insert(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Ad storage. Soft-deleted rows are invisible to every method.
#[async_trait]
pub trait AdRepository: Send + Sync {
    async fn insert(&self, owner_id: i64, fields: &AdFields) -> Result<AdRecord, DatabaseError>;

    async fn find_live(&self, id: i64) -> Result<Option<AdRecord>, DatabaseError>;

    async fn list(&self, params: &ListParams) -> Result<Vec<AdRecord>, DatabaseError>;

    /// Overwrites the mutable fields; `None` if the ad is gone.
    async fn update(&self, id: i64, fields: &AdFields) -> Result<Option<AdRecord>, DatabaseError>;

    /// Sets `deleted_at`; `false` if the ad was already gone.
    async fn soft_delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

const AD_COLUMNS: &str = r#"
    a.id, a.title, a.description, a.image_url, a.price, a.user_id,
    u.username, a.created_at, a.updated_at
"#;

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_write(e, username))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgAdRepository {
    pool: PgPool,
}

impl PgAdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdRepository for PgAdRepository {
    async fn insert(&self, owner_id: i64, fields: &AdFields) -> Result<AdRecord, DatabaseError> {
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO ads (title, description, image_url, price, user_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {AD_COLUMNS} FROM a JOIN users u ON u.id = a.user_id
            "#
        );

        let record = sqlx::query_as::<_, AdRecord>(&sql)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.image_url)
            .bind(fields.price)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_live(&self, id: i64) -> Result<Option<AdRecord>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM ads a JOIN users u ON u.id = a.user_id
            WHERE a.id = $1 AND a.deleted_at IS NULL
            "#
        );

        let record = sqlx::query_as::<_, AdRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn list(&self, params: &ListParams) -> Result<Vec<AdRecord>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM ads a JOIN users u ON u.id = a.user_id
            WHERE a.deleted_at IS NULL
            {}
            "#,
            FilterOrder::generate("a", params)
        );

        let records = sqlx::query_as::<_, AdRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn update(&self, id: i64, fields: &AdFields) -> Result<Option<AdRecord>, DatabaseError> {
        let sql = format!(
            r#"
            WITH a AS (
                UPDATE ads
                SET title = $2, description = $3, image_url = $4, price = $5, updated_at = now()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING *
            )
            SELECT {AD_COLUMNS} FROM a JOIN users u ON u.id = a.user_id
            "#
        );

        let record = sqlx::query_as::<_, AdRecord>(&sql)
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.image_url)
            .bind(fields.price)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE ads SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
