//! Handlers for the signed-in user's own account.
//!
//! A successful password or username change ends the session: the stored
//! token no longer matches the account, so the user signs in again.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use landreg_client::models::{Page, PageRequest, PasswordChange, UserLog, UsernameChange};
use landreg_core::guard::require_reauth;

use crate::error::{validate_input, AppResult};
use crate::middleware::auth::RequireSession;
use crate::response::DataResponse;
use crate::session::RequestSessionStore;
use crate::state::AppState;

/// GET /api/v1/profile/logs?page=..&size=..
pub async fn my_logs(
    session: RequireSession,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<UserLog>>>> {
    validate_input(&page)?;
    let logs = session.backend(&state).current_user_logs(page).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// PUT /api/v1/profile/password
pub async fn change_password(
    session: RequireSession,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<PasswordChange>,
) -> AppResult<Response> {
    validate_input(&input)?;
    session.backend(&state).change_password(&input).await?;
    tracing::info!(user = ?session.claims.sub, "Password changed");
    end_session(&state, &headers)
}

/// PUT /api/v1/profile/username
pub async fn change_username(
    session: RequireSession,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<UsernameChange>,
) -> AppResult<Response> {
    validate_input(&input)?;
    session.backend(&state).update_current_user(&input).await?;
    tracing::info!(user = ?session.claims.sub, new_username = %input.username, "Username changed");
    end_session(&state, &headers)
}

fn end_session(state: &AppState, headers: &HeaderMap) -> AppResult<Response> {
    let store = RequestSessionStore::from_headers(headers);
    let navigation = require_reauth(&store);
    store.navigation_response(navigation, state.config.cookie_secure)
}
