//! Unverified JWT claim inspection.
//!
//! The backend signs tokens with a server-side secret the client never sees,
//! so claims are decoded without signature verification. They are for
//! display only (`sst auth status`) and never for access decisions.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims the backend puts in its access tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: Option<i64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub plan: Option<String>,
    pub company_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    plan: Option<String>,
    #[serde(default)]
    company_id: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

impl SessionClaims {
    /// Decode the payload segment of a JWT.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the token does not have
    /// three segments or the payload is not base64url JSON.
    pub fn decode_unverified(token: &str) -> Result<Self, AuthError> {
        let mut parts = token.trim().split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::InvalidToken("expected three segments".into()));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::InvalidToken(format!("payload base64: {e}")))?;
        let raw: RawClaims = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::InvalidToken(format!("payload json: {e}")))?;

        Ok(Self {
            user_id: raw.id,
            email: raw.email,
            role: raw.role,
            plan: raw.plan,
            company_id: raw.company_id,
            expires_at: raw.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)),
        })
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    /// Tokens without `exp` never expire.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|at| at <= Utc::now() + TimeDelta::seconds(buffer_secs))
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_near_expiry(0)
    }
}
