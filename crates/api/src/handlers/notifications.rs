//! Handlers for the caller's notifications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use landreg_client::models::Notification;
use landreg_core::types::DbId;

use crate::error::{not_found_as, AppResult};
use crate::middleware::auth::RequireSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
pub async fn my_notifications(
    session: RequireSession,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = session.backend(&state).my_notifications().await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// PUT /api/v1/notifications/{id}/read
pub async fn mark_read(
    session: RequireSession,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<StatusCode> {
    session
        .backend(&state)
        .mark_notification_read(notification_id)
        .await
        .map_err(not_found_as("notification", notification_id))?;
    Ok(StatusCode::NO_CONTENT)
}
