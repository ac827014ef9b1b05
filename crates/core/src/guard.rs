//! Route guarding on top of [`authorize`](crate::session::authorize_with).
//!
//! [`RouteGuard`] is the effectful half of the session check: it reads the
//! token from a [`SessionStore`], asks for a decision, clears the store when
//! the token has expired and turns the decision into a [`Navigation`].

use crate::session::{
    authorize_with, AccessDecision, ClaimsDecoder, DenyReason, JwtClaimsDecoder, TokenClaims,
};
use crate::store::SessionStore;

/// Entry point unauthenticated users are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Landing page after sign-in or sign-out.
pub const HOME_PATH: &str = "/";

/// What the host should do with the current navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// Show the protected view.
    Render { claims: TokenClaims },
    /// Go elsewhere. With `replace` set the current history entry is
    /// overwritten so "back" cannot return to the refused view.
    Redirect {
        to: &'static str,
        replace: bool,
        reason: Option<DenyReason>,
    },
}

impl Navigation {
    fn to_login(reason: DenyReason) -> Self {
        Self::Redirect {
            to: LOGIN_PATH,
            replace: true,
            reason: Some(reason),
        }
    }

    fn to_home() -> Self {
        Self::Redirect {
            to: HOME_PATH,
            replace: true,
            reason: None,
        }
    }
}

pub struct RouteGuard<S, D = JwtClaimsDecoder> {
    store: S,
    decoder: D,
}

impl<S: SessionStore> RouteGuard<S> {
    pub fn new(store: S) -> Self {
        Self::with_decoder(store, JwtClaimsDecoder)
    }
}

impl<S: SessionStore, D: ClaimsDecoder> RouteGuard<S, D> {
    pub fn with_decoder(store: S, decoder: D) -> Self {
        Self { store, decoder }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Evaluate the stored token at `now_millis`.
    ///
    /// An unreadable store counts as having no token.
    pub fn evaluate(&self, now_millis: i64) -> Navigation {
        let raw = match self.store.get() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Session store unreadable, treating as signed out");
                None
            }
        };

        match authorize_with(&self.decoder, raw.as_deref(), now_millis) {
            AccessDecision::Allow { claims } => Navigation::Render { claims },
            AccessDecision::Deny(reason) => {
                if reason == DenyReason::ExpiredToken {
                    if let Err(e) = self.store.clear() {
                        tracing::warn!(error = %e, "Failed to clear expired session token");
                    }
                }
                tracing::info!(reason = %reason, "Protected view refused");
                Navigation::to_login(reason)
            }
        }
    }
}

/// Store a freshly issued token.
pub fn sign_in<S: SessionStore + ?Sized>(store: &S, token: &str) -> Navigation {
    match store.set(token) {
        Ok(()) => Navigation::to_home(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to store session token");
            Navigation::to_login(DenyReason::NoToken)
        }
    }
}

/// Forget the current token and return to the landing page.
pub fn sign_out<S: SessionStore + ?Sized>(store: &S) -> Navigation {
    if let Err(e) = store.clear() {
        tracing::warn!(error = %e, "Failed to clear session token on sign-out");
    }
    Navigation::to_home()
}

/// Forget the current token and send the user to sign in again, after
/// their credentials changed.
pub fn require_reauth<S: SessionStore + ?Sized>(store: &S) -> Navigation {
    if let Err(e) = store.clear() {
        tracing::warn!(error = %e, "Failed to clear session token after credential change");
    }
    Navigation::Redirect {
        to: LOGIN_PATH,
        replace: true,
        reason: None,
    }
}

/// Finish an OAuth sign-in whose token arrives as a URL fragment
/// (`#<token>`). A missing token sends the user back to the login page.
pub fn complete_oauth_redirect<S: SessionStore + ?Sized>(store: &S, fragment: &str) -> Navigation {
    let token = fragment.strip_prefix('#').unwrap_or(fragment);
    if token.is_empty() {
        return Navigation::to_login(DenyReason::NoToken);
    }
    sign_in(store, token)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::session::tests::token_expiring_at;
    use crate::store::{MemorySessionStore, SessionStoreError};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn valid_token_renders() {
        let guard = RouteGuard::new(MemorySessionStore::with_token(token_expiring_at(
            9_999_999_999,
        )));
        assert_matches!(guard.evaluate(NOW), Navigation::Render { claims } if claims.expires_at() == 9_999_999_999);
        assert!(guard.store().get().unwrap().is_some());
    }

    #[test]
    fn empty_store_redirects_to_login_replacing_history() {
        let guard = RouteGuard::new(MemorySessionStore::new());
        assert_eq!(
            guard.evaluate(NOW),
            Navigation::Redirect {
                to: LOGIN_PATH,
                replace: true,
                reason: Some(DenyReason::NoToken),
            }
        );
    }

    #[test]
    fn expired_token_is_cleared() {
        let guard = RouteGuard::new(MemorySessionStore::with_token(token_expiring_at(1000)));
        assert_matches!(
            guard.evaluate(NOW),
            Navigation::Redirect { to: LOGIN_PATH, replace: true, reason: Some(DenyReason::ExpiredToken) }
        );
        assert_eq!(guard.store().get().unwrap(), None);
    }

    #[test]
    fn malformed_token_is_kept() {
        let guard = RouteGuard::new(MemorySessionStore::with_token("abc"));
        assert_matches!(
            guard.evaluate(NOW),
            Navigation::Redirect { reason: Some(DenyReason::MalformedToken), .. }
        );
        assert_eq!(guard.store().get().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn unreadable_store_counts_as_no_token() {
        struct Broken;
        impl SessionStore for Broken {
            fn get(&self) -> Result<Option<String>, SessionStoreError> {
                Err(SessionStoreError::Poisoned)
            }
            fn set(&self, _token: &str) -> Result<(), SessionStoreError> {
                Err(SessionStoreError::Poisoned)
            }
            fn clear(&self) -> Result<(), SessionStoreError> {
                Err(SessionStoreError::Poisoned)
            }
        }

        let guard = RouteGuard::new(Broken);
        assert_matches!(
            guard.evaluate(NOW),
            Navigation::Redirect { reason: Some(DenyReason::NoToken), .. }
        );
        assert_matches!(sign_in(&Broken, "a.b.c"), Navigation::Redirect { to: LOGIN_PATH, .. });
    }

    #[test]
    fn oauth_fragment_is_stored() {
        let store = MemorySessionStore::new();
        let nav = complete_oauth_redirect(&store, "#h.c.s");
        assert_matches!(nav, Navigation::Redirect { to: HOME_PATH, replace: true, reason: None });
        assert_eq!(store.get().unwrap().as_deref(), Some("h.c.s"));
    }

    #[test]
    fn oauth_without_token_goes_to_login() {
        let store = MemorySessionStore::new();
        assert_matches!(
            complete_oauth_redirect(&store, "#"),
            Navigation::Redirect { to: LOGIN_PATH, .. }
        );
        assert_matches!(
            complete_oauth_redirect(&store, ""),
            Navigation::Redirect { to: LOGIN_PATH, .. }
        );
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn sign_out_clears_and_goes_home() {
        let store = MemorySessionStore::with_token("h.c.s");
        assert_matches!(sign_out(&store), Navigation::Redirect { to: HOME_PATH, .. });
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn reauth_clears_and_goes_to_login() {
        let store = MemorySessionStore::with_token("h.c.s");
        assert_matches!(
            require_reauth(&store),
            Navigation::Redirect { to: LOGIN_PATH, replace: true, reason: None }
        );
        assert_eq!(store.get().unwrap(), None);
    }
}
