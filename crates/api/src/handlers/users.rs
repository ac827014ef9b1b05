//! Admin handlers for user accounts and the activity log.
//!
//! Every handler here requires [`RequireAdmin`]: full admins and
//! country admins alike.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use landreg_client::models::{Page, PageRequest, User, UserLog};
use landreg_core::error::CoreError;
use landreg_core::roles::{can_grant, is_known_role};
use landreg_core::types::DbId;
use serde::Deserialize;

use crate::error::{not_found_as, validate_input, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// GET /api/v1/users?page=..&size=..
pub async fn list_users(
    RequireAdmin { session, .. }: RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<User>>>> {
    validate_input(&page)?;
    let users = session.backend(&state).list_users(page).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    RequireAdmin { session, .. }: RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = session
        .backend(&state)
        .get_user(user_id)
        .await
        .map_err(not_found_as("user", user_id))?;
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    RequireAdmin { session, .. }: RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    session
        .backend(&state)
        .delete_user(user_id)
        .await
        .map_err(not_found_as("user", user_id))?;
    tracing::info!(user_id, admin = ?session.claims.sub, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/users/{id}/role
///
/// Country admins may assign every role except `ROLE_ADMIN`.
pub async fn set_role(
    RequireAdmin { session, role }: RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<StatusCode> {
    if !is_known_role(&input.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{}'",
            input.role
        ))));
    }
    if !can_grant(&role, &input.role) {
        tracing::info!(user_id, caller_role = %role, role = %input.role, "Role grant refused");
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{role} cannot grant {}",
            input.role
        ))));
    }

    session
        .backend(&state)
        .set_user_role(user_id, &input.role)
        .await
        .map_err(not_found_as("user", user_id))?;
    tracing::info!(user_id, role = %input.role, "User role changed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/logs?page=..&size=..
pub async fn list_user_logs(
    RequireAdmin { session, .. }: RequireAdmin,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<UserLog>>>> {
    validate_input(&page)?;
    let logs = session.backend(&state).list_user_logs(page).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/v1/users/{id}/logs?page=..&size=..
pub async fn user_logs(
    RequireAdmin { session, .. }: RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<DataResponse<Page<UserLog>>>> {
    validate_input(&page)?;
    let logs = session
        .backend(&state)
        .list_logs_for_user(user_id, page)
        .await
        .map_err(not_found_as("user", user_id))?;
    Ok(Json(DataResponse { data: logs }))
}
