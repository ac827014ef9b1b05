//! Handlers for ownership-history records.

use axum::extract::{Path, Query, State};
use axum::Json;
use landreg_client::models::{OwnershipHistory, Page, PageRequest};
use landreg_core::types::DbId;

use crate::error::{validate_input, AppResult};
use crate::middleware::auth::RequireSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/history
pub async fn list_history(
    session: RequireSession,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<OwnershipHistory>>>> {
    let records = session.backend(&state).list_history().await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/history/land/{id}?page=..&size=..
pub async fn history_by_land(
    session: RequireSession,
    State(state): State<AppState>,
    Path(land_id): Path<DbId>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<OwnershipHistory>>>> {
    validate_input(&page)?;
    let records = session.backend(&state).history_by_land(land_id, page).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/history/owner/{id}?page=..&size=..
pub async fn history_by_owner(
    session: RequireSession,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<OwnershipHistory>>>> {
    validate_input(&page)?;
    let records = session
        .backend(&state)
        .history_by_owner(owner_id, page)
        .await?;
    Ok(Json(DataResponse { data: records }))
}
