//! Handlers for landowners.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use landreg_client::models::{LandOwner, NewLandOwner, Page, PageRequest};
use landreg_core::types::DbId;

use super::lands::LandWithFootprint;
use crate::error::{not_found_as, validate_input, AppResult};
use crate::middleware::auth::RequireSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/owners?page=..&size=..
pub async fn list_owners(
    session: RequireSession,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<LandOwner>>>> {
    validate_input(&page)?;
    let owners = session.backend(&state).list_owners(page).await?;
    Ok(Json(DataResponse { data: owners }))
}

/// POST /api/v1/owners
pub async fn create_owner(
    session: RequireSession,
    State(state): State<AppState>,
    Json(input): Json<NewLandOwner>,
) -> AppResult<StatusCode> {
    validate_input(&input)?;
    session.backend(&state).add_owner(&input).await?;
    tracing::info!(
        first_name = %input.first_name,
        last_name = %input.last_name,
        "Land owner registered"
    );
    Ok(StatusCode::CREATED)
}

/// GET /api/v1/owners/{id}
pub async fn get_owner(
    session: RequireSession,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<Json<DataResponse<LandOwner>>> {
    let owner = session
        .backend(&state)
        .get_owner(owner_id)
        .await
        .map_err(not_found_as("owner", owner_id))?;
    Ok(Json(DataResponse { data: owner }))
}

/// GET /api/v1/owners/{id}/lands
///
/// Every parcel held by the owner, each with its map footprint.
pub async fn owner_lands(
    session: RequireSession,
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<LandWithFootprint>>>> {
    let lands = session
        .backend(&state)
        .owner_lands(owner_id)
        .await
        .map_err(not_found_as("owner", owner_id))?;
    let data = lands.into_iter().map(LandWithFootprint::from).collect();
    Ok(Json(DataResponse { data }))
}
