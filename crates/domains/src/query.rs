//! # Query Vocabulary
//!
//! The filter / sort / count / page interface shared by the query service and
//! every store adapter. Filtering and ordering are plain data plus pure
//! functions, so an in-memory adapter applies them directly while a SQL
//! adapter compiles the same query to `WHERE` / `ORDER BY` / `LIMIT` clauses.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::models::Post;

/// A caller's request for one page of posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    /// Case-insensitive title substring; `None` or empty keeps all posts
    pub search_term: Option<String>,
    /// `None` keeps the store's natural order (ascending id)
    pub sort: Option<SortSpec>,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            search_term: None,
            sort: None,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_sort(mut self, key: SortKey, ascending: bool) -> Self {
        self.sort = Some(SortSpec { key, ascending });
        self
    }
}

/// The fields a post listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// `upvotes - downvotes`
    Positivity,
}

impl FromStr for SortKey {
    type Err = DomainError;

    /// Unknown keys are rejected rather than silently ignored, so a typo in a
    /// caller's sort parameter surfaces immediately.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("positivity") {
            Ok(SortKey::Positivity)
        } else {
            Err(DomainError::UnknownSortKey(s.to_string()))
        }
    }
}

/// A sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub ascending: bool,
}

impl SortSpec {
    /// Defaults to ascending, matching the listing API's default direction.
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            ascending: true,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            ascending: false,
        }
    }
}

/// Filter predicate over posts. An unset field matches everything, so the
/// default filter is "keep all" (SQL-like semantics).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub title_contains: Option<String>,
}

impl PostFilter {
    /// Builds a filter from an optional search term. Empty and
    /// whitespace-only terms mean "no filter".
    pub fn from_term(term: Option<&str>) -> Self {
        let title_contains = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { title_contains }
    }

    /// Case-insensitive substring match against the post title.
    pub fn matches(&self, post: &Post) -> bool {
        match &self.title_contains {
            None => true,
            Some(term) => post
                .title
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}

/// A fully resolved store query: filter, order, and window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub filter: PostFilter,
    pub sort: Option<SortSpec>,
    pub offset: u64,
    pub limit: u64,
}

/// Total order for posts under a sort spec. Ties always break by ascending
/// id, regardless of direction, so repeated queries page deterministically.
pub fn compare_posts(a: &Post, b: &Post, spec: SortSpec) -> Ordering {
    let by_key = match spec.key {
        SortKey::Positivity => a.positivity().cmp(&b.positivity()),
    };
    let by_key = if spec.ascending {
        by_key
    } else {
        by_key.reverse()
    };
    by_key.then_with(|| a.id.cmp(&b.id))
}

/// In-place sort helper for in-memory adapters.
pub fn sort_posts(posts: &mut [Post], spec: SortSpec) {
    posts.sort_by(|a, b| compare_posts(a, b, spec));
}

/// One page of results plus the paging arithmetic callers need for
/// navigation links.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole filtered set, independent of the window
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: u32, page_size: u32) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
        }
    }

    /// Number of pages in the filtered set (0 when it is empty).
    pub fn total_pages(&self) -> u64 {
        if self.total_count == 0 {
            0
        } else {
            self.total_count.div_ceil(u64::from(self.page_size))
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}
