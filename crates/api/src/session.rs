//! Cookie-backed session storage for a single HTTP exchange.
//!
//! The browser keeps the token in the `token` cookie. A
//! [`RequestSessionStore`] is seeded from the incoming request and records
//! what the handler did to the slot, so the response can carry the matching
//! `Set-Cookie` header.

use std::sync::Mutex;

use axum::http::header::{AUTHORIZATION, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use landreg_core::guard::Navigation;
use landreg_core::store::{SessionStore, SessionStoreError, TOKEN_KEY};

use crate::error::{AppError, AppResult};

/// Response header naming why a protected view was refused.
pub const SESSION_DENY_HEADER: HeaderName = HeaderName::from_static("x-session-deny");

/// `Set-Cookie` value that deletes the session cookie.
pub(crate) const CLEAR_COOKIE: &str = "token=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Default)]
struct Slot {
    token: Option<String>,
    written: bool,
    cleared: bool,
}

/// Session slot for one request/response pair.
#[derive(Debug, Default)]
pub struct RequestSessionStore {
    slot: Mutex<Slot>,
}

impl RequestSessionStore {
    /// Seed the slot from `Authorization: Bearer`, falling back to the
    /// `token` cookie.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = bearer_token(headers).or_else(|| cookie_token(headers));
        Self {
            slot: Mutex::new(Slot {
                token,
                ..Slot::default()
            }),
        }
    }

    /// Token currently in the slot.
    pub fn current(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.token.clone())
    }

    pub fn was_cleared(&self) -> bool {
        self.slot.lock().map(|slot| slot.cleared).unwrap_or(false)
    }

    /// The `Set-Cookie` header value reflecting this exchange, if any.
    pub fn set_cookie(&self, secure: bool) -> AppResult<Option<HeaderValue>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| AppError::InternalError("session slot lock poisoned".into()))?;

        if slot.cleared {
            return Ok(Some(HeaderValue::from_static(CLEAR_COOKIE)));
        }
        match (&slot.token, slot.written) {
            (Some(token), true) => {
                let mut cookie = format!("{TOKEN_KEY}={token}; Path=/; HttpOnly; SameSite=Lax");
                if secure {
                    cookie.push_str("; Secure");
                }
                let value = HeaderValue::from_str(&cookie).map_err(|_| {
                    AppError::InternalError("session token is not a valid cookie value".into())
                })?;
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    /// Turn a guard navigation into an HTTP response.
    ///
    /// Redirects use `303 See Other`, which replaces the current history
    /// entry in browsers.
    pub fn navigation_response(&self, navigation: Navigation, secure: bool) -> AppResult<Response> {
        let mut response = match navigation {
            Navigation::Render { claims } => {
                axum::Json(crate::response::DataResponse { data: claims }).into_response()
            }
            Navigation::Redirect { to, reason, .. } => {
                let mut response = StatusCode::SEE_OTHER.into_response();
                response
                    .headers_mut()
                    .insert(LOCATION, HeaderValue::from_static(to));
                if let Some(reason) = reason {
                    response
                        .headers_mut()
                        .insert(SESSION_DENY_HEADER, HeaderValue::from_static(reason.code()));
                }
                response
            }
        };

        if let Some(cookie) = self.set_cookie(secure)? {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        Ok(response)
    }
}

impl SessionStore for RequestSessionStore {
    fn get(&self) -> Result<Option<String>, SessionStoreError> {
        let slot = self.slot.lock().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(slot.token.clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionStoreError> {
        let mut slot = self.slot.lock().map_err(|_| SessionStoreError::Poisoned)?;
        slot.token = Some(token.to_string());
        slot.written = true;
        slot.cleared = false;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut slot = self.slot.lock().map_err(|_| SessionStoreError::Poisoned)?;
        slot.token = None;
        slot.written = false;
        slot.cleared = true;
        Ok(())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_KEY)
        .map(|(_, value)| value.trim().to_string())
        .filter(|t| !t.is_empty())
}
