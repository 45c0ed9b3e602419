pub mod ad_service;
pub mod credential_service;

pub use ad_service::{AdInput, AdService};
pub use credential_service::{CredentialService, Credentials};

use thiserror::Error;

use crate::auth::PasswordError;
use crate::database::DatabaseError;
use crate::filter::FilterError;

/// Failures of the credential and ad rules, before they are mapped to HTTP.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Ad {0} not found")]
    AdNotFound(i64),

    #[error("Ad {0} belongs to another user")]
    NotOwner(i64),

    #[error("Owner '{0}' could not be resolved")]
    OwnerMissing(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field,
            message: message.into(),
        }
    }
}
