//! Route definitions for the `/profile` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET    /logs            -> my_logs
/// PUT    /password        -> change_password
/// PUT    /username        -> change_username
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", get(profile::my_logs))
        .route("/password", put(profile::change_password))
        .route("/username", put(profile::change_username))
}
