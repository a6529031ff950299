//! Page-based pagination for the transaction history endpoint.

use serde::{Deserialize, Serialize};

/// Default page size when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters for `GET /transaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub order_by: String,
    pub sort: SortOrder,
}

impl PaginationParams {
    /// Newest-first page `page` with `page_size` rows, clamped to
    /// [1, MAX_PAGE_SIZE]. Page 0 is treated as page 1.
    pub fn newest_first(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            order_by: "created_at".to_string(),
            sort: SortOrder::Desc,
        }
    }

    /// Parameters for the following page.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::newest_first(1, DEFAULT_PAGE_SIZE)
    }
}
