//! Session and authorization extractors.
//!
//! - [`auth::RequireSession`] -- Runs the session guard; redirects to `/login` on refusal.
//! - [`rbac::RequireAdmin`] -- Additionally requires one of the admin roles.

pub mod auth;
pub mod rbac;
