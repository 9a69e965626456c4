//! Uniform pagination primitives for list endpoints.

use serde::{Deserialize, Serialize};

/// A resolved pagination request: `page` is 1-based, `limit` is per-resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Resolve raw query parameters against a per-resource default limit.
    ///
    /// `page` and `limit` below 1 are clamped to 1.
    pub fn resolve(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }
}

/// Pagination metadata returned with every list response.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

/// Paginate an already-filtered list.
///
/// `pages == ceil(total / limit)`. A `page` beyond the last yields an empty
/// item list with the same total/pages metadata.
pub fn paginate<T>(items: Vec<T>, req: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let limit = req.limit as u64;
    let pages = total.div_ceil(limit);

    let start = (req.page as u64 - 1).saturating_mul(limit);
    let items = if start >= total {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start as usize)
            .take(req.limit as usize)
            .collect()
    };

    Page {
        items,
        pagination: PageInfo {
            page: req.page,
            limit: req.limit,
            total,
            pages,
        },
    }
}
