//! # Core Ports
//!
//! Any store adapter must implement these traits to be usable by the
//! services layer.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewPost, Post};
use crate::query::{PostFilter, PostQuery};

/// Data persistence contract for posts.
///
/// The store owns all mutation; the query service only ever calls `find` and
/// `count`. Implementations must apply `PostQuery` with the exact semantics
/// of the pure helpers in [`crate::query`], so every adapter pages
/// identically.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts a validated post. An existing id is a conflict, never an
    /// overwrite.
    async fn create(&self, post: NewPost) -> Result<Post>;

    async fn get(&self, id: i64) -> Result<Option<Post>>;

    /// Adjusts the vote counters by the given deltas. Counters saturate at
    /// zero; they never go negative.
    async fn vote(&self, id: i64, up_delta: i64, down_delta: i64) -> Result<Post>;

    /// Returns `true` if a post was removed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// The filtered, ordered window described by the query.
    async fn find(&self, query: &PostQuery) -> Result<Vec<Post>>;

    /// Size of the filtered set, independent of any window.
    async fn count(&self, filter: &PostFilter) -> Result<u64>;
}
