//! # sst-client
//!
//! REST client for the SST backend.
//!
//! - [`ApiClient`]: `get`/`post`/`put`/`delete` with bearer auth and uniform
//!   status handling, plus typed resource methods per module (ASO, NR-17,
//!   LTCAT, PGR, dashboard).
//! - [`mirror::LocalMirror`]: best-effort JSON file cache of fetched lists.
//! - [`navigator::PgrNavigator`]: drives the PGR cascading selection against
//!   the API.

pub mod aso;
pub mod dashboard;
pub mod ltcat;
pub mod mirror;
pub mod navigator;
pub mod nr17;
pub mod pgr;

mod error;
mod http;
mod wire;

pub use error::{ClientError, MirrorError, NavigatorError};

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sst_auth::TokenStore;
use sst_config::ApiConfig;

const USER_AGENT: &str = concat!("sst/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one backend and one token store.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    require_token: bool,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(api: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: api.base_url().to_string(),
            tokens,
            require_token: api.require_token,
        })
    }

    /// Underlying HTTP client, shared with the login exchange.
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn get(&self, path: &str) -> Result<Option<Value>, ClientError> {
        self.send(Method::GET, path, None::<&()>).await
    }

    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>, ClientError> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>, ClientError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ClientError> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    /// GET and deserialize.
    ///
    /// # Errors
    ///
    /// As [`Self::get`], plus [`ClientError::Malformed`] for an empty body
    /// or a shape mismatch.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        decode(path, self.get(path).await?)
    }

    /// POST and deserialize.
    ///
    /// # Errors
    ///
    /// As [`Self::get_json`].
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        decode(path, self.post(path, body).await?)
    }

    /// PUT and deserialize.
    ///
    /// # Errors
    ///
    /// As [`Self::get_json`].
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        decode(path, self.put(path, body).await?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Value>, ClientError> {
        let token = self.tokens.load();
        if token.is_none() && self.require_token {
            return Err(ClientError::NotAuthenticated);
        }

        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await?;
        tracing::debug!(status = resp.status().as_u16(), %url, "response");
        http::check_response(resp, self.tokens.as_ref()).await
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: Option<Value>) -> Result<T, ClientError> {
    let body = body.ok_or_else(|| ClientError::Malformed(format!("{path}: empty body")))?;
    serde_json::from_value(body).map_err(|e| {
        tracing::debug!(%path, error = %e, "response shape mismatch");
        ClientError::Malformed(format!("{path}: {e}"))
    })
}
