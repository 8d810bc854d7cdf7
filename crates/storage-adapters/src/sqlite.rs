//! # SqlitePostStore
//!
//! SQLite implementation of `PostStore`. The query vocabulary compiles to
//! SQL: the title filter becomes a `WHERE` clause, the sort spec an
//! `ORDER BY`, and the window a `LIMIT`/`OFFSET` pair, so paging happens in
//! the database rather than in process memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{DomainError, NewPost, Post, PostFilter, PostQuery, PostStore, Result, SortKey};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    /// Connects and installs the schema if it is missing.
    pub async fn new(url: &str) -> Result<Self> {
        // A shared in-memory database only lives as long as one connection,
        // so the pool must not open a second.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(store_err)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS posts (
                id         INTEGER PRIMARY KEY,
                title      TEXT NOT NULL,
                content    TEXT NOT NULL DEFAULT '',
                upvotes    INTEGER NOT NULL DEFAULT 0,
                downvotes  INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .map_err(store_err)?;

        Ok(Self { pool })
    }
}

fn store_err(err: sqlx::Error) -> DomainError {
    DomainError::StoreUnavailable(err.to_string())
}

fn row_to_post(row: &SqliteRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        upvotes: row.get("upvotes"),
        downvotes: row.get("downvotes"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

/// `instr` instead of `LIKE` sidesteps `%`/`_` wildcard escaping in
/// user-supplied search terms.
const TITLE_MATCH: &str = "instr(lower(title), lower(?)) > 0";

fn order_clause(query: &PostQuery) -> String {
    match query.sort {
        Some(spec) => {
            let key = match spec.key {
                SortKey::Positivity => "(upvotes - downvotes)",
            };
            let dir = if spec.ascending { "ASC" } else { "DESC" };
            // id ASC tie-break keeps paging deterministic in both directions
            format!(" ORDER BY {key} {dir}, id ASC")
        }
        None => " ORDER BY id ASC".to_string(),
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn create(&self, post: NewPost) -> Result<Post> {
        post.validate()?;
        let post = post.into_post(Utc::now());

        sqlx::query(
            "INSERT INTO posts (id, title, content, upvotes, downvotes, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.upvotes)
        .bind(post.downvotes)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::Conflict(format!("post {} already exists", post.id))
            }
            other => store_err(other),
        })?;

        Ok(post)
    }

    async fn get(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(row.as_ref().map(row_to_post))
    }

    async fn vote(&self, id: i64, up_delta: i64, down_delta: i64) -> Result<Post> {
        let result = sqlx::query(
            "UPDATE posts
             SET upvotes   = MAX(0, upvotes + ?),
                 downvotes = MAX(0, downvotes + ?)
             WHERE id = ?",
        )
        .bind(up_delta)
        .bind(down_delta)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(id));
        }
        self.get(id).await?.ok_or(DomainError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let mut sql = String::from(
            "SELECT id, title, content, upvotes, downvotes, created_at FROM posts",
        );
        if query.filter.title_contains.is_some() {
            sql.push_str(" WHERE ");
            sql.push_str(TITLE_MATCH);
        }
        sql.push_str(&order_clause(query));
        sql.push_str(" LIMIT ? OFFSET ?");

        let mut stmt = sqlx::query(&sql);
        if let Some(term) = &query.filter.title_contains {
            stmt = stmt.bind(term);
        }
        stmt = stmt
            .bind(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(query.offset).unwrap_or(i64::MAX));

        let rows = stmt.fetch_all(&self.pool).await.map_err(store_err)?;
        debug!(
            offset = query.offset,
            limit = query.limit,
            returned = rows.len(),
            "sqlite store query"
        );
        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64> {
        let mut sql = String::from("SELECT COUNT(*) FROM posts");
        if filter.title_contains.is_some() {
            sql.push_str(" WHERE ");
            sql.push_str(TITLE_MATCH);
        }

        let mut stmt = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(term) = &filter.title_contains {
            stmt = stmt.bind(term);
        }
        let total = stmt.fetch_one(&self.pool).await.map_err(store_err)?;
        Ok(total as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> SqlitePostStore {
        let store = SqlitePostStore::new("sqlite::memory:").await.unwrap();
        for (id, title, up, down) in [
            (1, "First Post", 10, 2),
            (2, "Second Post", 5, 1),
            (3, "Third Post", 2, 3),
        ] {
            store
                .create(NewPost::new(id, title, "").with_votes(up, down))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn filters_and_sorts_in_sql() {
        let store = seeded().await;

        let query = PostQuery {
            filter: PostFilter::from_term(Some("post")),
            sort: Some(domains::SortSpec::descending(SortKey::Positivity)),
            offset: 0,
            limit: 10,
        };
        let rows = store.find(&query).await.unwrap();
        assert_eq!(rows.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        assert_eq!(
            store
                .count(&PostFilter::from_term(Some("first")))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn duplicate_insert_maps_to_conflict() {
        let store = seeded().await;
        let err = store
            .create(NewPost::new(1, "Imposter", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn vote_saturates_in_sql() {
        let store = seeded().await;
        let post = store.vote(3, -10, 0).await.unwrap();
        assert_eq!(post.upvotes, 0);
        assert_eq!(post.downvotes, 3);
    }
}
