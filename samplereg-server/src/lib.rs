//! samplereg-server: HTTP service for sample registration
//!
//! Stores users and the samples registered against them in SQLite and
//! exposes them as JSON. Every error body is `{"detail": "..."}` so the
//! registration form can show it verbatim.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_memory_pool, create_pool};
pub use http::{build_router, run_server, ServerConfig};
