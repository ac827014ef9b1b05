//! Session token structure, claims decoding and the access decision.
//!
//! Tokens are compact JWTs issued by the land-registry backend. Nothing here
//! verifies signatures: [`authorize`] only decides whether a protected view
//! should render at all. The backend rejects forged or expired tokens on
//! every API call regardless of what this module decides.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Number of `.`-separated segments in a compact token.
pub const TOKEN_SEGMENTS: usize = 3;

/// base64url that accepts the claims segment with or without `=` padding.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// ---------------------------------------------------------------------------
// Token and claims
// ---------------------------------------------------------------------------

/// A structurally valid compact token: `header.claims.signature`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken<'a> {
    raw: &'a str,
}

impl<'a> SessionToken<'a> {
    /// Accept `raw` if it has exactly three segments.
    pub fn parse(raw: &'a str) -> Option<Self> {
        if raw.split('.').count() == TOKEN_SEGMENTS {
            Some(Self { raw })
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// The base64url-encoded claims segment.
    pub fn claims_segment(&self) -> &'a str {
        self.raw.split('.').nth(1).unwrap_or_default()
    }
}

/// Claims the dashboard reads from a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiration time (UTC Unix timestamp, seconds). Issuers may send a
    /// fractional value.
    pub exp: f64,
    /// Subject, usually the username.
    #[serde(default)]
    pub sub: Option<String>,
    /// Role name, when the issuer embeds one.
    #[serde(default)]
    pub role: Option<String>,
    /// Issued-at time (UTC Unix timestamp, seconds).
    #[serde(default)]
    pub iat: Option<f64>,
}

impl TokenClaims {
    /// Whether the token has expired at `now_millis`. Expiry exactly at
    /// `now_millis` counts as expired.
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        self.exp * 1000.0 <= now_millis as f64
    }

    /// Expiry in whole seconds since the Unix epoch, rounded down.
    pub fn expires_at(&self) -> i64 {
        self.exp.floor() as i64
    }
}

// ---------------------------------------------------------------------------
// Claims decoding
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("Claims segment is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Claims segment is not a JSON claims object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid claims: {0}")]
    Invalid(String),
}

/// Turns a structurally valid token into its claims.
pub trait ClaimsDecoder {
    fn decode(&self, token: SessionToken<'_>) -> Result<TokenClaims, ClaimsError>;
}

/// Reads the JWT payload segment. The header and signature segments are
/// never looked at, so any issuer algorithm (or an opaque header) works.
#[derive(Debug, Clone, Default)]
pub struct JwtClaimsDecoder;

impl ClaimsDecoder for JwtClaimsDecoder {
    fn decode(&self, token: SessionToken<'_>) -> Result<TokenClaims, ClaimsError> {
        let bytes = CLAIMS_ENGINE.decode(token.claims_segment())?;
        let claims: TokenClaims = serde_json::from_slice(&bytes)?;
        if !claims.exp.is_finite() {
            return Err(ClaimsError::Invalid(format!("exp is not finite: {}", claims.exp)));
        }
        Ok(claims)
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Why a protected view was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NoToken,
    MalformedToken,
    ExpiredToken,
}

impl DenyReason {
    /// Stable identifier used in logs and response headers.
    pub fn code(self) -> &'static str {
        match self {
            Self::NoToken => "no_token",
            Self::MalformedToken => "malformed_token",
            Self::ExpiredToken => "expired_token",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    Allow { claims: TokenClaims },
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow { .. } => None,
            Self::Deny(reason) => Some(*reason),
        }
    }
}

/// Decide whether a protected view may render, using [`JwtClaimsDecoder`].
pub fn authorize(raw_token: Option<&str>, now_millis: i64) -> AccessDecision {
    authorize_with(&JwtClaimsDecoder, raw_token, now_millis)
}

/// Decide whether a protected view may render.
///
/// A token expiring exactly at `now_millis` is already expired. Clearing an
/// expired token from storage is the caller's job.
pub fn authorize_with<D: ClaimsDecoder + ?Sized>(
    decoder: &D,
    raw_token: Option<&str>,
    now_millis: i64,
) -> AccessDecision {
    let raw = match raw_token {
        Some(raw) if !raw.is_empty() => raw,
        _ => return AccessDecision::Deny(DenyReason::NoToken),
    };

    let Some(token) = SessionToken::parse(raw) else {
        return AccessDecision::Deny(DenyReason::MalformedToken);
    };

    let claims = match decoder.decode(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Session token claims could not be decoded");
            return AccessDecision::Deny(DenyReason::MalformedToken);
        }
    };

    if claims.is_expired_at(now_millis) {
        return AccessDecision::Deny(DenyReason::ExpiredToken);
    }

    AccessDecision::Allow { claims }
}
