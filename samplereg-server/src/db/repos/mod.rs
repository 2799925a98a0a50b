//! Repository implementations for database access

pub mod samples;
pub mod users;

pub use samples::SampleRepo;
pub use users::{User, UserRepo, UserWithSamples};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A unique constraint rejected the write
    #[error("{detail}")]
    Conflict { detail: &'static str },
}

impl DbError {
    /// Map a unique-constraint violation to `Conflict`, pass anything else through
    pub(crate) fn on_unique(err: sqlx::Error, detail: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict { detail },
            _ => Self::Sqlx(err),
        }
    }
}
