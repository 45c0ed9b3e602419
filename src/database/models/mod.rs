pub mod ad;
pub mod user;

pub use ad::{AdFields, AdRecord};
pub use user::{PublicUser, User};
