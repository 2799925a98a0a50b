//! Custom Axum extractors
//!
//! Decode failures in bodies, paths and query strings become
//! `ApiError::Unprocessable`, so clients always get a `detail` body instead of
//! axum's plain-text rejections.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body whose rejection is a `{"detail": ...}` 422
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::Unprocessable {
                detail: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}

/// Extract and validate an integer id from the path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Unprocessable {
                detail: e.body_text(),
            })?;

        let id = raw.parse::<i64>().map_err(|_| ApiError::Unprocessable {
            detail: format!("id must be an integer, got '{}'", raw),
        })?;

        Ok(Self(id))
    }
}

/// Query string whose rejection is a `{"detail": ...}` 422
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| ApiError::Unprocessable {
                detail: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
