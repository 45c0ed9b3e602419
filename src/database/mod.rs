pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{AdFields, AdRecord, PublicUser, User};
pub use repository::{AdRepository, PgAdRepository, PgUserRepository, UserRepository};
