use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::Product;

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
        }
    }
}

/// Query string of `GET /products`. Unknown `sort`/`sort_by` values fall back
/// to the defaults instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    Name,
    Price,
}

impl SortField {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("name") => SortField::Name,
            Some("price") => SortField::Price,
            _ => SortField::CreatedAt,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Name => "name",
            SortField::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolved listing parameters handed to the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    /// `(limit, offset)`; `None` lists everything.
    pub window: Option<(i64, i64)>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl From<ListQuery> for ListParams {
    fn from(q: ListQuery) -> Self {
        let window = match (q.page, q.limit) {
            (Some(page), Some(limit)) if page > 0 && limit > 0 => {
                Some((limit as i64, (page as i64 - 1) * limit as i64))
            }
            _ => None,
        };
        Self {
            window,
            sort_by: SortField::parse(q.sort_by.as_deref()),
            order: SortOrder::parse(q.sort.as_deref()),
        }
    }
}
