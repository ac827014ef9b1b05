//! Route definitions for the `/users` resource.
//!
//! All endpoints require `ROLE_ADMIN` or `ROLE_COUNTRY_ADMIN`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                -> list_users
/// GET    /logs            -> list_user_logs
/// GET    /{id}            -> get_user
/// DELETE /{id}            -> delete_user
/// PUT    /{id}/role       -> set_role
/// GET    /{id}/logs       -> user_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/logs", get(users::list_user_logs))
        .route("/{id}", get(users::get_user).delete(users::delete_user))
        .route("/{id}/role", put(users::set_role))
        .route("/{id}/logs", get(users::user_logs))
}
