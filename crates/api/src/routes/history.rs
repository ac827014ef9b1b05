//! Route definitions for the `/history` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /                -> list_history
/// GET    /land/{id}       -> history_by_land
/// GET    /owner/{id}      -> history_by_owner
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(history::list_history))
        .route("/land/{id}", get(history::history_by_land))
        .route("/owner/{id}", get(history::history_by_owner))
}
