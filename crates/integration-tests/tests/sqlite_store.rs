//! The SQL adapter must page exactly like the in-memory reference. Runs the
//! listing scenarios end to end against `SqlitePostStore`.

use std::sync::Arc;

use domains::{PageRequest, PostStore, SortKey};
use integration_tests::{init_tracing, seed_posts};
use services::PostQueryService;
use storage_adapters::SqlitePostStore;

async fn sqlite_service() -> PostQueryService {
    init_tracing();
    let store = SqlitePostStore::new("sqlite::memory:")
        .await
        .expect("in-memory sqlite must open");
    for post in seed_posts() {
        store.create(post).await.expect("seeding must not fail");
    }
    PostQueryService::new(Arc::new(store))
}

#[tokio::test]
async fn returns_paged_posts() {
    let service = sqlite_service().await;

    let page = service.get_posts(PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn filters_by_search_term() {
    let service = sqlite_service().await;

    let page = service
        .get_posts(PageRequest::new(1, 2).with_search("first"))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "First Post");
}

#[tokio::test]
async fn sorts_by_positivity_descending() {
    let service = sqlite_service().await;

    let page = service
        .get_posts(PageRequest::new(1, 3).with_sort(SortKey::Positivity, false))
        .await
        .unwrap();
    let ids: Vec<i64> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_unchanged_total() {
    let service = sqlite_service().await;

    let page = service.get_posts(PageRequest::new(9, 2)).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 3);
}
