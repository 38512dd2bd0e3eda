//! Offset/limit pagination over UCloud list APIs
//!
//! UCloud list actions take `Offset` and `Limit` and may report a
//! `TotalCount`. [`collect_pages`] drives such an action until the last page
//! and returns every item in fetch order.

use std::future::Future;

use tracing::debug;

use crate::error::{CoreError, Result};

/// Page size used by the UCloud console and SDKs
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Upper bound on pages fetched for one logical query
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// One batch returned by a list call
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole collection, when the API reports it
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: Option<u64>) -> Self {
        Self { items, total_count }
    }
}

/// Page size and guard for [`collect_pages`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub page_size: u32,
    /// Fail with [`CoreError::PaginationLimitExceeded`] rather than fetch more than this many pages
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl PaginationConfig {
    pub fn new(page_size: u32, max_pages: usize) -> Result<Self> {
        let config = Self {
            page_size,
            max_pages,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(CoreError::Validation(
                "page size must be greater than zero".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(CoreError::Validation(
                "max pages must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fetch every page of a collection
///
/// `fetch` is called with `(offset, limit)`, starting at offset 0. After each
/// page the loop stops when the page is short (fewer than `limit` items), or
/// when the reported total count has been reached; otherwise it advances by
/// `limit`. Pages are requested strictly one after another.
///
/// Any fetch error aborts the whole collection. Items gathered so far are
/// dropped.
///
/// # Example
///
/// ```rust
/// use ucloudctl_core::pagination::{collect_pages, Page, PaginationConfig};
///
/// # async fn example() -> ucloudctl_core::Result<()> {
/// let all = collect_pages(&PaginationConfig::default(), |offset, limit| async move {
///     let items: Vec<u32> = (offset..(offset + limit).min(250)).collect();
///     Ok(Page::new(items, Some(250)))
/// })
/// .await?;
/// assert_eq!(all.len(), 250);
/// # Ok(())
/// # }
/// ```
pub async fn collect_pages<T, F, Fut>(config: &PaginationConfig, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    config.validate()?;

    let limit = config.page_size;
    let mut offset: u32 = 0;
    let mut pages = 0usize;
    let mut all = Vec::new();

    loop {
        let page = fetch(offset, limit).await?;
        pages += 1;

        let received = page.items.len();
        all.extend(page.items);

        debug!(offset, limit, received, total = ?page.total_count, "Fetched page");

        // Short page is the last page
        if received < limit as usize {
            break;
        }

        if let Some(total) = page.total_count
            && u64::from(offset) + u64::from(limit) >= total
        {
            break;
        }

        if pages >= config.max_pages {
            return Err(CoreError::PaginationLimitExceeded {
                pages,
                items: all.len(),
            });
        }

        offset = offset.checked_add(limit).ok_or_else(|| {
            CoreError::Upstream(format!("pagination offset overflowed after {} pages", pages))
        })?;
    }

    Ok(all)
}
