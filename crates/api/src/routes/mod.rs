pub mod health;
pub mod history;
pub mod lands;
pub mod notifications;
pub mod owners;
pub mod profile;
pub mod session;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route requires a session; `/users` additionally requires one of
/// the admin roles.
///
/// ```text
/// /footprint                              footprint preview (GET)
///
/// /lands                                  list, create
/// /lands/search                           filtered, paged search
/// /lands/unassigned                       lands without an owner
/// /lands/surface-area                     paged, by area range
/// /lands/{id}                             get, delete
/// /lands/{id}/preview                     land with footprint
/// /lands/{id}/usage-type/{usage}          change usage type (PUT)
/// /lands/{id}/owner/{owner_id}            transfer ownership (POST)
///
/// /owners                                 list, create
/// /owners/{id}                            get
/// /owners/{id}/lands                      owned lands with footprints
///
/// /history                                all ownership records
/// /history/land/{id}                      records for a land
/// /history/owner/{id}                     records for an owner
///
/// /users                                  list (admin only)
/// /users/logs                             activity log
/// /users/{id}                             get, delete
/// /users/{id}/role                        change role (PUT)
/// /users/{id}/logs                        one user's activity
///
/// /profile/logs                           caller's own activity
/// /profile/password                       change password (PUT)
/// /profile/username                       change username (PUT)
///
/// /notifications                          caller's notifications
/// /notifications/{id}/read                mark read (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/footprint", get(handlers::lands::preview_footprint))
        .nest("/lands", lands::router())
        .nest("/owners", owners::router())
        .nest("/history", history::router())
        .nest("/users", users::router())
        .nest("/notifications", notifications::router())
        .nest("/profile", profile::router())
}
