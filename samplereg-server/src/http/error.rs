//! API error types with IntoResponse
//!
//! Every error becomes `{"detail": "..."}` with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::UserNameError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Submitted user name refused (400)
    InvalidName(UserNameError),

    /// Business rule rejected the request (400)
    BadRequest { detail: String },

    /// Resource not found (404)
    NotFound { detail: String },

    /// Body or path could not be decoded (422)
    Unprocessable { detail: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidName(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::InvalidName(e) => e.to_string(),
            Self::BadRequest { detail }
            | Self::NotFound { detail }
            | Self::Unprocessable { detail } => detail,
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "an internal error occurred".to_string()
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<UserNameError> for ApiError {
    fn from(e: UserNameError) -> Self {
        Self::InvalidName(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, .. } => Self::NotFound {
                detail: format!("{} not found", capitalize(resource)),
            },
            DbError::Conflict { detail } => Self::bad_request(detail),
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_name_is_400() {
        let err = ApiError::from(UserNameError::Blank);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "User name cannot be empty");
    }

    #[tokio::test]
    async fn not_found_detail_is_capitalized() {
        let err = ApiError::from(DbError::NotFound {
            resource: "user",
            id: "7".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "User not found");
    }

    #[tokio::test]
    async fn conflict_is_400_with_detail() {
        let err = ApiError::from(DbError::Conflict {
            detail: "A sample with this label is already registered",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            "A sample with this label is already registered"
        );
    }

    #[tokio::test]
    async fn database_error_is_generic() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "an internal error occurred");
    }
}
