//! Role-based access control (RBAC) extractors.
//!
//! Token claims are not trusted for roles; the backend is asked for the
//! current role of the session on every admin request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use landreg_core::error::CoreError;
use landreg_core::roles::is_admin_role;

use super::auth::RequireSession;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `ROLE_ADMIN` or `ROLE_COUNTRY_ADMIN`. Rejects with 403
/// Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(admin: RequireAdmin) -> AppResult<Json<()>> {
///     tracing::info!(role = %admin.role, "admin view");
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin {
    pub session: RequireSession,
    /// The role the backend reported for this session.
    pub role: String,
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = RequireSession::from_request_parts(parts, state).await?;
        let role = session.backend(state).current_role().await?;
        if !is_admin_role(&role) {
            tracing::info!(user = ?session.claims.sub, %role, "Admin view refused");
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin { session, role })
    }
}
