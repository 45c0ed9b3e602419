pub mod error;
pub mod filter_order;
pub mod types;

pub use error::FilterError;
pub use filter_order::FilterOrder;
pub use types::*;
