//! Handlers for land parcels and footprint previews.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use landreg_client::models::{Land, LandSearch, LandSort, NewLand, Page, PageRequest, UsageType};
use landreg_core::error::CoreError;
use landreg_core::geo::{effective_area, Footprint, GeoPoint};
use landreg_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::{not_found_as, validate_input, AppResult};
use crate::middleware::auth::RequireSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string of `GET /api/v1/footprint`. The coordinates are range
/// checked by [`GeoPoint::new`].
#[derive(Debug, Deserialize)]
pub struct FootprintQuery {
    pub lat: f64,
    pub lng: f64,
    /// Surface area in square meters.
    pub area: Option<f64>,
    /// Also resolve a place label for the center.
    #[serde(default)]
    pub geocode: bool,
}

#[derive(Debug, Serialize)]
pub struct FootprintPreview {
    pub center: GeoPoint,
    /// The area actually drawn, after substituting the default.
    pub area_sq_m: f64,
    pub footprint: Footprint,
    /// North-west and south-east corners, for fitting the map view.
    pub bounds: [GeoPoint; 2],
    pub geojson: serde_json::Value,
    pub location: Option<String>,
}

impl FootprintPreview {
    fn new(center: GeoPoint, area_sq_m: Option<f64>, location: Option<String>) -> Self {
        let footprint = center.footprint(area_sq_m);
        Self {
            center,
            area_sq_m: effective_area(area_sq_m),
            bounds: [footprint.north_west(), footprint.south_east()],
            geojson: footprint.to_geojson(),
            footprint,
            location,
        }
    }
}

/// Query string selecting the sort order of `GET /api/v1/lands`.
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort: LandSort,
}

/// Query string of `GET /api/v1/lands/surface-area`, in square meters.
#[derive(Debug, Deserialize)]
pub struct SurfaceAreaQuery {
    pub min: f64,
    pub max: f64,
    #[serde(default = "ascending_area")]
    pub sort: LandSort,
}

fn ascending_area() -> LandSort {
    LandSort::SurfaceAreaAsc
}

impl SurfaceAreaQuery {
    fn check(&self) -> Result<(), CoreError> {
        if !(self.min >= 0.0 && self.max.is_finite()) {
            return Err(CoreError::Validation(
                "surface area bounds must be finite and non-negative".into(),
            ));
        }
        if self.min > self.max {
            return Err(CoreError::Validation(format!(
                "min surface area {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// A land record with its map-preview footprint.
///
/// `footprint` is absent when the stored coordinates cannot be parsed.
#[derive(Debug, Serialize)]
pub struct LandWithFootprint {
    #[serde(flatten)]
    pub land: Land,
    pub footprint: Option<Footprint>,
}

impl From<Land> for LandWithFootprint {
    fn from(land: Land) -> Self {
        let footprint = match land.footprint() {
            Ok(footprint) => Some(footprint),
            Err(e) => {
                tracing::debug!(land_id = land.id, error = %e, "No footprint for land");
                None
            }
        };
        Self { land, footprint }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/footprint?lat=..&lng=..&area=..&geocode=..
pub async fn preview_footprint(
    _session: RequireSession,
    State(state): State<AppState>,
    Query(query): Query<FootprintQuery>,
) -> AppResult<Json<DataResponse<FootprintPreview>>> {
    let center = GeoPoint::new(query.lat, query.lng)?;

    let location = if query.geocode {
        Some(state.geocoder.reverse(center).await)
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: FootprintPreview::new(center, query.area, location),
    }))
}

/// GET /api/v1/lands?sort=..&page=..&size=..
pub async fn list_lands(
    session: RequireSession,
    State(state): State<AppState>,
    Query(sort): Query<SortQuery>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<Land>>>> {
    validate_input(&page)?;
    let lands = session.backend(&state).list_lands(sort.sort, page).await?;
    Ok(Json(DataResponse { data: lands }))
}

/// GET /api/v1/lands/search?location=..&usageType=..&ownerName=..&sortedBy=..
pub async fn search_lands(
    session: RequireSession,
    State(state): State<AppState>,
    Query(search): Query<LandSearch>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<Land>>>> {
    validate_input(&page)?;
    let lands = session.backend(&state).search_lands(&search, page).await?;
    Ok(Json(DataResponse { data: lands }))
}

/// GET /api/v1/lands/unassigned
pub async fn unassigned_lands(
    session: RequireSession,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Land>>>> {
    let lands = session.backend(&state).unassigned_lands().await?;
    Ok(Json(DataResponse { data: lands }))
}

/// GET /api/v1/lands/surface-area?min=..&max=..&sort=..&page=..&size=..
pub async fn lands_by_surface_area(
    session: RequireSession,
    State(state): State<AppState>,
    Query(range): Query<SurfaceAreaQuery>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<Land>>>> {
    range.check()?;
    validate_input(&page)?;
    let lands = session
        .backend(&state)
        .lands_by_surface_area(range.min, range.max, range.sort, page)
        .await?;
    Ok(Json(DataResponse { data: lands }))
}

/// GET /api/v1/lands/{id}
pub async fn get_land(
    session: RequireSession,
    State(state): State<AppState>,
    Path(land_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Land>>> {
    let land = session
        .backend(&state)
        .get_land(land_id)
        .await
        .map_err(not_found_as("land", land_id))?;
    Ok(Json(DataResponse { data: land }))
}

/// GET /api/v1/lands/{id}/preview
///
/// The land record plus its footprint. Unparseable stored coordinates are
/// a validation error here rather than a missing footprint.
pub async fn land_preview(
    session: RequireSession,
    State(state): State<AppState>,
    Path(land_id): Path<DbId>,
) -> AppResult<Json<DataResponse<FootprintPreview>>> {
    let land = session
        .backend(&state)
        .get_land(land_id)
        .await
        .map_err(not_found_as("land", land_id))?;

    let center = land.coordinates()?;

    Ok(Json(DataResponse {
        data: FootprintPreview::new(center, land.surface_area, land.location),
    }))
}

/// POST /api/v1/lands
pub async fn create_land(
    session: RequireSession,
    State(state): State<AppState>,
    Json(input): Json<NewLand>,
) -> AppResult<StatusCode> {
    validate_input(&input)?;
    session.backend(&state).add_land(&input).await?;
    tracing::info!(
        lat = input.latitude,
        lng = input.longitude,
        usage = input.usage_type.as_str(),
        "Land registered"
    );
    Ok(StatusCode::CREATED)
}

/// PUT /api/v1/lands/{id}/usage-type/{usage}
pub async fn update_usage_type(
    session: RequireSession,
    State(state): State<AppState>,
    Path((land_id, usage)): Path<(DbId, UsageType)>,
) -> AppResult<StatusCode> {
    session
        .backend(&state)
        .update_usage_type(land_id, usage)
        .await
        .map_err(not_found_as("land", land_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/lands/{id}
pub async fn delete_land(
    session: RequireSession,
    State(state): State<AppState>,
    Path(land_id): Path<DbId>,
) -> AppResult<StatusCode> {
    session
        .backend(&state)
        .delete_land(land_id)
        .await
        .map_err(not_found_as("land", land_id))?;
    tracing::info!(land_id, "Land deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/lands/{id}/owner/{owner_id}
///
/// Transfer ownership. The backend records the history entry and notifies
/// the parties.
pub async fn assign_owner(
    session: RequireSession,
    State(state): State<AppState>,
    Path((land_id, owner_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    session
        .backend(&state)
        .assign_owner(land_id, owner_id)
        .await?;
    tracing::info!(land_id, owner_id, "Land ownership transferred");
    Ok(StatusCode::NO_CONTENT)
}
