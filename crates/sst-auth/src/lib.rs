//! # sst-auth
//!
//! Authentication for the `sst` CLI.
//!
//! Provides the login exchange (JSON or form-encoded), token storage
//! (OS keychain, `SST_AUTH__TOKEN`, `~/.sst/credentials`) and unverified
//! inspection of the backend's JWT claims.

pub mod claims;
pub mod error;
pub mod login;
pub mod token_store;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use login::{LoginSession, login};
pub use token_store::{KeyringTokenStore, MemoryTokenStore, TokenSource, TokenStore};

/// Log in and persist the returned token.
///
/// # Errors
///
/// Returns the login error, or [`AuthError::TokenStoreError`] when the token
/// cannot be saved.
pub async fn login_and_store(
    http: &reqwest::Client,
    api: &sst_config::ApiConfig,
    store: &dyn TokenStore,
    identity: &str,
    password: &str,
) -> Result<LoginSession, AuthError> {
    let session = login(http, api, identity, password).await?;
    store.store(&session.access_token)?;
    Ok(session)
}
