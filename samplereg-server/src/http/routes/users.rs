//! User endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::{User, UserRepo, UserWithSamples};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{ListParams, Page, UserName};

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

/// GET /users - list selectable users
async fn list_users(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.pool).list(Page::from(params)).await?;
    Ok(Json(users))
}

/// POST /users - register a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let name = UserName::new(&req.name)?;
    let user = UserRepo::new(&state.pool).create(&name).await?;
    tracing::info!(id = user.id, name = %user.name, "user created");
    Ok(Json(user))
}

/// GET /users/{user_id} - user with their samples
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidId(user_id): ValidId,
) -> Result<Json<UserWithSamples>, ApiError> {
    let user = UserRepo::new(&state.pool).get(user_id).await?;
    Ok(Json(user))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", get(get_user))
}
