//! Shared fixtures for the integration test suites.

use std::sync::Arc;

use domains::{NewPost, PostStore};
use services::PostQueryService;
use storage_adapters::MemoryPostStore;

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init()
        .ok();
}

/// The canonical three-post fixture used across the suites.
pub fn seed_posts() -> Vec<NewPost> {
    vec![
        NewPost::new(1, "First Post", "Content of the first post").with_votes(10, 2),
        NewPost::new(2, "Second Post", "Content of the second post").with_votes(5, 1),
        NewPost::new(3, "Third Post", "Content of the third post").with_votes(2, 3),
    ]
}

/// A query service over a freshly seeded in-memory store.
pub async fn seeded_service() -> PostQueryService {
    init_tracing();
    let store = MemoryPostStore::new();
    for post in seed_posts() {
        store.create(post).await.expect("seeding must not fail");
    }
    PostQueryService::new(Arc::new(store))
}
