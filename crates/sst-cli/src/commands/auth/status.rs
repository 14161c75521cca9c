use serde::Serialize;
use sst_auth::{KeyringTokenStore, SessionClaims, TokenStore};

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Default, Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    token_source: Option<&'static str>,
    email: Option<String>,
    role: Option<String>,
    plan: Option<String>,
    company_id: Option<i64>,
    expires_at: Option<String>,
    expired: Option<bool>,
    note: Option<String>,
}

pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = KeyringTokenStore::new();
    let status = describe(store.load(), store.source().map(|source| source.as_str()));
    output(&status, flags.format)
}

/// Inspect the stored token without contacting the server.
fn describe(token: Option<String>, source: Option<&'static str>) -> AuthStatusResponse {
    let Some(token) = token else {
        return AuthStatusResponse {
            note: Some("no token stored; run `sst auth login`".into()),
            ..AuthStatusResponse::default()
        };
    };

    match SessionClaims::decode_unverified(&token) {
        Ok(claims) => {
            let expired = claims.is_expired();
            AuthStatusResponse {
                authenticated: !expired,
                token_source: source,
                expires_at: claims.expires_at.map(|at| at.to_rfc3339()),
                expired: Some(expired),
                email: claims.email,
                role: claims.role,
                plan: claims.plan,
                company_id: claims.company_id,
                note: expired.then(|| "token expired; run `sst auth login`".into()),
            }
        }
        Err(error) => AuthStatusResponse {
            authenticated: true,
            token_source: source,
            note: Some(format!("token is not a readable JWT ({error})")),
            ..AuthStatusResponse::default()
        },
    }
}
