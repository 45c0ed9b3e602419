use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::ServiceError;
use crate::auth::PasswordHasher;
use crate::database::{DatabaseError, PublicUser, UserRepository};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 6;

/// `{username, password}` body shared by /register and /login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    fn trimmed(&self) -> (&str, &str) {
        (self.username.trim(), self.password.trim())
    }
}

pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    // compared against when the username is unknown so both failure paths cost one bcrypt verify
    decoy_hash: String,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Result<Self, ServiceError> {
        let decoy_hash = hasher.hash("decoy-password")?;
        Ok(Self {
            users,
            hasher,
            decoy_hash,
        })
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<PublicUser, ServiceError> {
        let (username, password) = credentials.trimmed();
        validate_credentials(username, password)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(ServiceError::UsernameTaken(username.to_string()));
        }

        let hash = self.hasher.hash(password)?;
        let user = match self.users.insert(username, &hash).await {
            Ok(user) => user,
            // lost a race with a concurrent registration of the same name
            Err(DatabaseError::UniqueViolation(_)) => {
                return Err(ServiceError::UsernameTaken(username.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        info!("Registered user '{}' (id {})", user.username, user.id);
        Ok(PublicUser::from(&user))
    }

    /// Unknown username and wrong password fail identically.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<PublicUser, ServiceError> {
        let (username, password) = credentials.trimmed();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::validation(
                "username",
                "Username and password are required",
            ));
        }

        match self.users.find_by_username(username).await? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => {
                debug!("User '{}' authenticated", user.username);
                Ok(PublicUser::from(&user))
            }
            Some(_) => Err(ServiceError::InvalidCredentials),
            None => {
                self.hasher.verify(password, &self.decoy_hash);
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.users.ping().await
    }
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), ServiceError> {
    let length = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
        return Err(ServiceError::validation(
            "username",
            format!(
                "Username must be between {} and {} characters",
                USERNAME_MIN, USERNAME_MAX
            ),
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(ServiceError::validation(
            "username",
            "Username must not contain spaces",
        ));
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(ServiceError::validation(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN),
        ));
    }
    Ok(())
}
