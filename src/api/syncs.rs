use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::Credentials;
use super::validation::Payload;
use super::{ApiError, AppState, ProgressAckResponse, ProgressResponse};
use crate::services::ProgressUpdate;

/// `PUT /syncs/progress`
///
/// The body is decoded before credentials are checked, so a malformed body
/// is a 400 even for unknown users.
pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    credentials: Credentials,
    Payload(update): Payload<ProgressUpdate>,
) -> Result<(StatusCode, Json<ProgressAckResponse>), ApiError> {
    let ack = state
        .sync_service()
        .push_progress(&credentials.username, &credentials.key, update)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProgressAckResponse {
            document: ack.document,
            timestamp: ack.timestamp,
        }),
    ))
}

/// `GET /syncs/progress/{document}`
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    credentials: Credentials,
    Path(document): Path<String>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let record = state
        .sync_service()
        .pull_progress(&credentials.username, &credentials.key, &document)
        .await?;

    Ok(Json(ProgressResponse::from(record)))
}
