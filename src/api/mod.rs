pub mod extract;
pub mod format;

pub use extract::{ApiJson, ApiQuery};
pub use format::{AdView, TokenView};
