//! # Domain Models
//!
//! These structs represent the core entities of the post board.
//! Posts carry caller-assigned integer ids so the store never has to
//! coordinate id generation with its callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// A single board post with its vote counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// Body text, may be empty
    pub content: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Net score of the post. Always recomputed from the current counters,
    /// never cached, so it cannot go stale after a vote.
    pub fn positivity(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

/// Input for creating a post. Validated by the store before insertion.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub upvotes: i64,
    pub downvotes: i64,
}

impl NewPost {
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            upvotes: 0,
            downvotes: 0,
        }
    }

    /// Seeds the vote counters, e.g. when importing posts from another system.
    pub fn with_votes(mut self, upvotes: i64, downvotes: i64) -> Self {
        self.upvotes = upvotes;
        self.downvotes = downvotes;
        self
    }

    /// Checks the model invariants: non-empty title, non-negative counters.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if self.upvotes < 0 || self.downvotes < 0 {
            return Err(DomainError::Validation(
                "vote counters must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Stamps the input into a full `Post` at insertion time.
    pub fn into_post(self, created_at: DateTime<Utc>) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positivity_is_derived_from_counters() {
        let post = NewPost::new(1, "First Post", "")
            .with_votes(10, 2)
            .into_post(Utc::now());
        assert_eq!(post.positivity(), 8);
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = NewPost::new(1, "   ", "body").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn negative_counters_are_rejected() {
        let err = NewPost::new(1, "ok", "")
            .with_votes(-1, 0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
