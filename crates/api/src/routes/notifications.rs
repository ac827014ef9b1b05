//! Route definitions for the `/notifications` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                -> my_notifications
/// PUT    /{id}/read       -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::my_notifications))
        .route("/{id}/read", put(notifications::mark_read))
}
