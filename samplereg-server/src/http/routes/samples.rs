//! Sample endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use samplereg_core::{NewSample, Sample};

use crate::db::repos::samples::DUPLICATE_LABEL;
use crate::db::{DbError, SampleRepo, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{ListParams, Page};

pub const DIAMETER_ORDER: &str = "Inner diameter must be lesser than outer diameter";

/// POST /users/{user_id}/samples - register a sample for a user
///
/// Checks run in order: owner exists, label unused, inner < outer.
async fn create_sample(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
    ValidJson(sample): ValidJson<NewSample>,
) -> Result<Json<Sample>, ApiError> {
    let owner = UserRepo::new(&state.pool)
        .find(user_id)
        .await?
        .ok_or(DbError::NotFound {
            resource: "user",
            id: user_id.to_string(),
        })?;

    let repo = SampleRepo::new(&state.pool);
    if repo.label_exists(&sample.sample_label).await? {
        return Err(ApiError::bad_request(DUPLICATE_LABEL));
    }

    if sample.inner_diameter >= sample.outer_diameter {
        return Err(ApiError::bad_request(DIAMETER_ORDER));
    }

    let created = repo.create(owner.id, &sample).await?;
    tracing::info!(
        id = created.id,
        owner_id = owner.id,
        label = %created.sample_label,
        "sample registered"
    );
    Ok(Json(created))
}

/// GET /samples - list registered samples
async fn list_samples(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<Vec<Sample>>, ApiError> {
    let samples = SampleRepo::new(&state.pool).list(Page::from(params)).await?;
    Ok(Json(samples))
}

/// Sample routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/samples", post(create_sample))
        .route("/samples", get(list_samples))
}
