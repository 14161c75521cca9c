use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `sst auth login`")]
    NotAuthenticated,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("login rejected by validation (422): {0}")]
    Validation(String),

    #[error("login route {0} not found (404)")]
    RouteNotFound(String),

    #[error("login failed (status {status}): {message}")]
    LoginFailed { status: u16, message: String },

    #[error("login succeeded but the response has no token: {0}")]
    UnexpectedResponse(String),

    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("token is not a readable JWT: {0}")]
    InvalidToken(String),
}
