//! # Post Query Service
//!
//! The paged post listing: validate the request, resolve it into a store
//! query, and assemble the page envelope. Purely a read projection; all
//! mutation lives behind the store.

use std::sync::Arc;

use domains::{
    DomainError, Page, PageRequest, Post, PostFilter, PostQuery, PostStore, Result,
};
use tracing::{debug, warn};

/// Guard rails for page requests.
#[derive(Debug, Clone, Copy)]
pub struct QueryLimits {
    /// Largest window a single request may ask for. Oversized requests are
    /// rejected, not clamped, so callers notice instead of silently getting
    /// fewer rows than they asked for.
    pub max_page_size: u32,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

/// Read-side service over a [`PostStore`].
///
/// Holds no state beyond the store handle, so it is safe to share across
/// concurrent callers.
pub struct PostQueryService {
    store: Arc<dyn PostStore>,
    limits: QueryLimits,
}

impl PostQueryService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self::with_limits(store, QueryLimits::default())
    }

    pub fn with_limits(store: Arc<dyn PostStore>, limits: QueryLimits) -> Self {
        Self { store, limits }
    }

    /// Returns one page of posts matching the request, plus the total match
    /// count across all pages.
    ///
    /// A window past the end of the filtered set is not an error: it yields
    /// empty `items` with the correct `total_count`.
    pub async fn get_posts(&self, req: PageRequest) -> Result<Page<Post>> {
        self.validate(&req)?;

        let filter = PostFilter::from_term(req.search_term.as_deref());
        let total_count = self.store.count(&filter).await?;

        let query = PostQuery {
            filter,
            sort: req.sort,
            offset: u64::from(req.page - 1) * u64::from(req.page_size),
            limit: u64::from(req.page_size),
        };
        let items = self.store.find(&query).await?;

        debug!(
            page = req.page,
            page_size = req.page_size,
            total_count,
            returned = items.len(),
            "post page served"
        );
        Ok(Page::new(items, total_count, req.page, req.page_size))
    }

    fn validate(&self, req: &PageRequest) -> Result<()> {
        if req.page < 1 {
            warn!(page = req.page, "rejected page request: page below 1");
            return Err(DomainError::InvalidPage(format!(
                "page must be >= 1, got {}",
                req.page
            )));
        }
        if req.page_size < 1 {
            warn!(page_size = req.page_size, "rejected page request: empty window");
            return Err(DomainError::InvalidPage(format!(
                "page_size must be >= 1, got {}",
                req.page_size
            )));
        }
        if req.page_size > self.limits.max_page_size {
            warn!(
                page_size = req.page_size,
                max = self.limits.max_page_size,
                "rejected page request: window too large"
            );
            return Err(DomainError::InvalidPage(format!(
                "page_size must be <= {}, got {}",
                self.limits.max_page_size, req.page_size
            )));
        }
        Ok(())
    }
}
