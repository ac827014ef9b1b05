//! Well-known role name constants.
//!
//! These must match the role names issued by the land-registry backend.

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_COUNTRY_ADMIN: &str = "ROLE_COUNTRY_ADMIN";

/// All roles the backend accepts in a role assignment.
pub const ALL_ROLES: [&str; 3] = [ROLE_USER, ROLE_ADMIN, ROLE_COUNTRY_ADMIN];

/// Returns `true` if `role` is one of the known role names.
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

/// Roles admitted to the user-administration views.
pub fn is_admin_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_COUNTRY_ADMIN
}

/// Whether a caller holding `caller` may assign `target` to an account.
///
/// Only a full admin hands out `ROLE_ADMIN`; both admin roles may assign
/// the other roles.
pub fn can_grant(caller: &str, target: &str) -> bool {
    if !is_admin_role(caller) || !is_known_role(target) {
        return false;
    }
    target != ROLE_ADMIN || caller == ROLE_ADMIN
}
