use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::auth::Credentials;
use super::validation::Payload;
use super::{ApiError, AppState, AuthorizedResponse, CreateUserResponse};
use crate::services::NewAccount;

/// `POST /users/create`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Payload(account): Payload<NewAccount>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let username = state.sync_service().create_account(account).await?;
    Ok((StatusCode::CREATED, Json(CreateUserResponse { username })))
}

/// `GET /users/auth`
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    credentials: Credentials,
) -> Result<Json<AuthorizedResponse>, ApiError> {
    state
        .sync_service()
        .check_auth(&credentials.username, &credentials.key)
        .await?;
    Ok(Json(AuthorizedResponse::OK))
}
