//! Shared response handling.
//!
//! Every request goes through [`check_response`]: a 401 clears the stored
//! token and becomes [`ClientError::Unauthorized`], any other non-success
//! status becomes [`ClientError::Api`] with the raw body, and a success body
//! is parsed as JSON when it is JSON.

use serde_json::Value;
use sst_auth::TokenStore;

use crate::error::ClientError;

/// Map a response to its JSON body.
///
/// Returns `Ok(None)` for a success response with an empty or non-JSON body.
///
/// # Errors
///
/// [`ClientError::Unauthorized`] on 401, [`ClientError::Api`] on any other
/// non-success status, [`ClientError::Transport`] if the body cannot be read.
pub async fn check_response(
    resp: reqwest::Response,
    tokens: &dyn TokenStore,
) -> Result<Option<Value>, ClientError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        if let Err(error) = tokens.clear() {
            tracing::warn!(%error, "failed to clear token after 401");
        }
        return Err(ClientError::Unauthorized);
    }
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }

    let body = resp.text().await?;
    Ok(parse_body(&body))
}

fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(%error, "response body is not JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use sst_auth::MemoryTokenStore;

    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn unauthorized_clears_token_once() {
        let store = MemoryTokenStore::with_token("stale");
        let err = check_response(mock_response(401, ""), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
        assert_eq!(store.clear_count(), 1);
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn client_error_keeps_raw_body() {
        let store = MemoryTokenStore::with_token("tok");
        let err = check_response(
            mock_response(404, r#"{"detail":"Registro LTCAT não encontrado."}"#),
            &store,
        )
        .await
        .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("não encontrado"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.clear_count(), 0);
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let store = MemoryTokenStore::default();
        let err = check_response(mock_response(500, "boom"), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn empty_or_non_json_success_is_none() {
        let store = MemoryTokenStore::default();
        assert!(check_response(mock_response(204, ""), &store).await.unwrap().is_none());
        assert!(
            check_response(mock_response(200, "<html>ok</html>"), &store)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn json_success_is_parsed() {
        let store = MemoryTokenStore::default();
        let value = check_response(mock_response(200, r#"{"msg":"ok"}"#), &store)
            .await
            .unwrap();
        assert_eq!(value, Some(serde_json::json!({"msg": "ok"})));
    }
}
