//! Store adapters implementing the `PostStore` port from `domains`.
//!
//! `MemoryPostStore` is always compiled and backs the test suites; the SQLite
//! adapter is feature-gated behind `db-sqlite`.

pub mod memory;

pub use memory::MemoryPostStore;

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

#[cfg(feature = "db-sqlite")]
pub use sqlite::SqlitePostStore;
