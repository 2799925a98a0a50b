//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost frontends only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses shaped `{"detail": ...}`

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
