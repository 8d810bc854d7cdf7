//! Application services for the post board.
//!
//! Services orchestrate domain logic against the ports defined in `domains`;
//! they hold no persistence logic of their own.

pub mod post_query;

pub use post_query::{PostQueryService, QueryLimits};
