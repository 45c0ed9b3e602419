use std::sync::Arc;

use crate::auth::{JwtError, PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::{AdRepository, UserRepository};
use crate::services::{AdService, CredentialService, ServiceError};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Everything a handler may touch. All of it is read-only after startup;
/// per-request identity travels in request extensions instead.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub credentials: Arc<CredentialService>,
    pub ads: Arc<AdService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        ads: Arc<dyn AdRepository>,
    ) -> Result<Self, StateError> {
        let tokens = TokenService::from_config(&config.security)?;
        let hasher = PasswordHasher::new(config.security.bcrypt_cost);
        let credentials = CredentialService::new(users.clone(), hasher)?;
        let ads = AdService::new(ads, users);

        Ok(Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            credentials: Arc::new(credentials),
            ads: Arc::new(ads),
        })
    }
}
