use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Invalid page: {0} (must be a positive integer)")]
    InvalidPage(String),

    #[error("Invalid limit: {0} (must be between 1 and 100)")]
    InvalidLimit(String),

    #[error("Invalid sort field: {0} (allowed: created_at, price, title)")]
    InvalidSort(String),

    #[error("Invalid order: {0} (allowed: ASC, DESC)")]
    InvalidOrder(String),
}

impl FilterError {
    /// Query parameter the error refers to
    pub fn parameter(&self) -> &'static str {
        match self {
            FilterError::InvalidPage(_) => "page",
            FilterError::InvalidLimit(_) => "limit",
            FilterError::InvalidSort(_) => "sort",
            FilterError::InvalidOrder(_) => "order",
        }
    }
}
