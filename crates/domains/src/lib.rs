//! The central domain logic and interface definitions for the post board.
//!
//! Everything in this crate is persistence-agnostic: models, the paging and
//! filtering vocabulary, and the `PostStore` port that adapters implement.

pub mod error;
pub mod models;
pub mod ports;
pub mod query;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
pub use query::*;
