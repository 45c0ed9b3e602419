use serde::{Deserialize, Serialize};

use super::error::FilterError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Raw `?page&limit&sort&order` query. Everything stays a string so that a
/// bad value can be reported against the parameter that carried it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    Price,
    Title,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Price => "price",
            SortField::Title => "title",
        }
    }

    fn parse(s: &str) -> Result<Self, FilterError> {
        match s {
            "created_at" => Ok(SortField::CreatedAt),
            "price" => Ok(SortField::Price),
            "title" => Ok(SortField::Title),
            other => Err(FilterError::InvalidSort(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    fn parse(s: &str) -> Result<Self, FilterError> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(FilterError::InvalidOrder(s.to_string()))
        }
    }
}

/// Validated page request for the ad listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub sort: SortField,
    pub order: SortDirection,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortField::CreatedAt,
            order: SortDirection::Desc,
        }
    }
}

impl ListParams {
    pub fn from_query(query: &ListQuery) -> Result<Self, FilterError> {
        let mut params = Self::default();

        if let Some(page) = present(&query.page) {
            params.page = match page.parse::<u32>() {
                Ok(v) if v >= 1 => v,
                _ => return Err(FilterError::InvalidPage(page.to_string())),
            };
        }

        if let Some(limit) = present(&query.limit) {
            params.limit = match limit.parse::<u32>() {
                Ok(v) if (1..=MAX_LIMIT).contains(&v) => v,
                _ => return Err(FilterError::InvalidLimit(limit.to_string())),
            };
        }

        if let Some(sort) = present(&query.sort) {
            params.sort = SortField::parse(sort)?;
        }

        if let Some(order) = present(&query.order) {
            params.order = SortDirection::parse(order)?;
        }

        Ok(params)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

// Empty parameters (`?page=`) count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
