//! Route definitions for the `/lands` resource.
//!
//! All endpoints require a session.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::lands;
use crate::state::AppState;

/// Routes mounted at `/lands`.
///
/// ```text
/// GET    /                              -> list_lands
/// POST   /                              -> create_land
/// GET    /search                        -> search_lands
/// GET    /unassigned                    -> unassigned_lands
/// GET    /surface-area                  -> lands_by_surface_area
/// GET    /{id}                          -> get_land
/// DELETE /{id}                          -> delete_land
/// GET    /{id}/preview                  -> land_preview
/// PUT    /{id}/usage-type/{usage}       -> update_usage_type
/// POST   /{id}/owner/{owner_id}         -> assign_owner
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lands::list_lands).post(lands::create_land))
        .route("/search", get(lands::search_lands))
        .route("/unassigned", get(lands::unassigned_lands))
        .route("/surface-area", get(lands::lands_by_surface_area))
        .route("/{id}", get(lands::get_land).delete(lands::delete_land))
        .route("/{id}/preview", get(lands::land_preview))
        .route("/{id}/usage-type/{usage}", put(lands::update_usage_type))
        .route("/{id}/owner/{owner_id}", post(lands::assign_owner))
}
