//! Database layer - connection pool and repositories
//!
//! - SQLite pool, schema applied on connect
//! - Rely on DB constraints for uniqueness; map violations to conflicts

pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool};
pub use repos::*;
