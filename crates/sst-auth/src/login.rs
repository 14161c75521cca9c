//! Credential exchange against the backend login route.

use serde::{Deserialize, Serialize};
use sst_config::{ApiConfig, LoginMode};

use crate::error::AuthError;

/// What the backend returns on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSession {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
}

impl LoginSession {
    fn bare(token: String) -> Self {
        Self {
            access_token: token,
            token_type: None,
            name: None,
            role: None,
            plan: None,
            company_id: None,
        }
    }
}

#[derive(Serialize)]
struct JsonCredentials<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

fn form_body(identity: &str, password: &str) -> String {
    format!(
        "grant_type=password&username={}&password={}",
        urlencoding::encode(identity),
        urlencoding::encode(password)
    )
}

/// Exchange credentials for an access token.
///
/// The identity is sent as both `email` and `username` in JSON mode, and as
/// `username` in form mode.
///
/// # Errors
///
/// - [`AuthError::InvalidCredentials`] on 401.
/// - [`AuthError::Validation`] on 422.
/// - [`AuthError::RouteNotFound`] on 404.
/// - [`AuthError::LoginFailed`] on any other non-2xx status.
/// - [`AuthError::UnexpectedResponse`] when a 2xx body carries no token.
/// - [`AuthError::Transport`] when the server cannot be reached.
pub async fn login(
    http: &reqwest::Client,
    api: &ApiConfig,
    identity: &str,
    password: &str,
) -> Result<LoginSession, AuthError> {
    let path = api.login_path();
    let url = format!("{}{path}", api.base_url());
    tracing::debug!(%url, mode = ?api.login_mode, "login request");

    let request = match api.login_mode {
        LoginMode::Json => http.post(&url).json(&JsonCredentials {
            email: identity,
            username: identity,
            password,
        }),
        LoginMode::Form => http
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(form_body(identity, password)),
    };

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    match status.as_u16() {
        200..=299 => parse_session(&body),
        401 => Err(AuthError::InvalidCredentials),
        422 => Err(AuthError::Validation(body)),
        404 => Err(AuthError::RouteNotFound(path.to_string())),
        code => Err(AuthError::LoginFailed {
            status: code,
            message: body,
        }),
    }
}

/// Accept `{"access_token": ...}` or a bare JSON string token.
fn parse_session(body: &str) -> Result<LoginSession, AuthError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|_| AuthError::UnexpectedResponse(truncate(body)))?;

    let has_token = value
        .get("access_token")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|t| !t.is_empty());

    match value {
        serde_json::Value::String(token) if !token.is_empty() => Ok(LoginSession::bare(token)),
        serde_json::Value::Object(_) if has_token => serde_json::from_value(value)
            .map_err(|e| AuthError::UnexpectedResponse(e.to_string())),
        _ => Err(AuthError::UnexpectedResponse(truncate(body))),
    }
}

fn truncate(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_is_urlencoded() {
        assert_eq!(
            form_body("ana@empresa.com", "p&ss word"),
            "grant_type=password&username=ana%40empresa.com&password=p%26ss%20word"
        );
    }

    #[test]
    fn parses_object_and_string_tokens() {
        let session = parse_session(
            r#"{"access_token":"abc","token_type":"bearer","name":"Ana","role":"admin","plan":"pro","company_id":2}"#,
        )
        .unwrap();
        assert_eq!(session.access_token, "abc");
        assert_eq!(session.company_id, Some(2));

        let bare = parse_session(r#""xyz""#).unwrap();
        assert_eq!(bare.access_token, "xyz");
        assert!(bare.name.is_none());
    }

    #[test]
    fn missing_token_is_unexpected() {
        for body in [r#"{"detail":"ok"}"#, r#"{"access_token":""}"#, "not json", "42"] {
            assert!(
                matches!(parse_session(body), Err(AuthError::UnexpectedResponse(_))),
                "{body}"
            );
        }
    }
}
