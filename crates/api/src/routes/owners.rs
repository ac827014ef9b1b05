//! Route definitions for the `/owners` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::owners;
use crate::state::AppState;

/// Routes mounted at `/owners`.
///
/// ```text
/// GET    /                -> list_owners
/// POST   /                -> create_owner
/// GET    /{id}            -> get_owner
/// GET    /{id}/lands      -> owner_lands
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(owners::list_owners).post(owners::create_owner))
        .route("/{id}", get(owners::get_owner))
        .route("/{id}/lands", get(owners::owner_lands))
}
