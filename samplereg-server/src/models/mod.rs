//! Request models with validation at construction
//!
//! Invalid input returns an error value, never a panic.

pub mod pagination;
pub mod user;

pub use pagination::{ListParams, Page};
pub use user::{UserName, UserNameError};
