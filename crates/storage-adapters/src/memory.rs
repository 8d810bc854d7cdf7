//! # MemoryPostStore
//!
//! In-memory implementation of `PostStore`, used as the database substitute
//! in tests and as the reference for the query semantics every adapter must
//! match. Natural (unsorted) order is ascending id.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::{
    sort_posts, DomainError, NewPost, Post, PostFilter, PostQuery, PostStore, Result,
};
use tracing::debug;

#[derive(Default)]
pub struct MemoryPostStore {
    posts: DashMap<i64, Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered snapshot in ascending-id order.
    fn snapshot(&self, filter: &PostFilter) -> Vec<Post> {
        let mut rows: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|p| p.id);
        rows
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post> {
        post.validate()?;
        match self.posts.entry(post.id) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "post {} already exists",
                post.id
            ))),
            Entry::Vacant(slot) => {
                let post = post.into_post(Utc::now());
                slot.insert(post.clone());
                Ok(post)
            }
        }
    }

    async fn get(&self, id: i64) -> Result<Option<Post>> {
        Ok(self.posts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn vote(&self, id: i64, up_delta: i64, down_delta: i64) -> Result<Post> {
        let mut entry = self
            .posts
            .get_mut(&id)
            .ok_or(DomainError::NotFound(id))?;
        let post = entry.value_mut();
        // Counters saturate at zero, never negative
        post.upvotes = (post.upvotes + up_delta).max(0);
        post.downvotes = (post.downvotes + down_delta).max(0);
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.posts.remove(&id).is_some())
    }

    async fn find(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let mut rows = self.snapshot(&query.filter);
        if let Some(spec) = query.sort {
            sort_posts(&mut rows, spec);
        }

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let window: Vec<Post> = rows.into_iter().skip(offset).take(limit).collect();
        debug!(offset, limit, returned = window.len(), "memory store query");
        Ok(window)
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64> {
        let matching = self
            .posts
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count();
        Ok(matching as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let store = MemoryPostStore::new();
        store.create(NewPost::new(1, "First Post", "")).await.unwrap();

        let err = store
            .create(NewPost::new(1, "Imposter", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // The original post is untouched
        let kept = store.get(1).await.unwrap().unwrap();
        assert_eq!(kept.title, "First Post");
    }

    #[tokio::test]
    async fn votes_saturate_at_zero() {
        let store = MemoryPostStore::new();
        store
            .create(NewPost::new(1, "First Post", "").with_votes(2, 0))
            .await
            .unwrap();

        let post = store.vote(1, -5, -1).await.unwrap();
        assert_eq!(post.upvotes, 0);
        assert_eq!(post.downvotes, 0);

        let err = store.vote(99, 1, 0).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(99)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_post_existed() {
        let store = MemoryPostStore::new();
        store.create(NewPost::new(1, "First Post", "")).await.unwrap();

        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
        assert_eq!(store.count(&PostFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn natural_order_is_ascending_id() {
        let store = MemoryPostStore::new();
        for id in [3, 1, 2] {
            store
                .create(NewPost::new(id, format!("Post {id}"), ""))
                .await
                .unwrap();
        }

        let query = PostQuery {
            filter: PostFilter::default(),
            sort: None,
            offset: 0,
            limit: 10,
        };
        let rows = store.find(&query).await.unwrap();
        assert_eq!(rows.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
