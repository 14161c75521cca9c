//! Login round trips against a local `tiny_http` server.

use std::io::Read;
use std::thread::JoinHandle;

use pretty_assertions::assert_eq;
use sst_auth::{AuthError, MemoryTokenStore, TokenStore, login, login_and_store};
use sst_config::{ApiConfig, LoginMode};

struct Captured {
    method: String,
    url: String,
    content_type: Option<String>,
    body: String,
}

/// Serve exactly one request with `status` and `body`, returning what was
/// received.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind");
    let port = server.server_addr().to_ip().expect("ip addr").port();
    let handle = std::thread::spawn(move || {
        let mut request = server.recv().expect("recv");
        let mut received = String::new();
        request
            .as_reader()
            .read_to_string(&mut received)
            .expect("read body");
        let captured = Captured {
            method: request.method().to_string(),
            url: request.url().to_string(),
            content_type: request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Content-Type"))
                .map(|h| h.value.to_string()),
            body: received,
        };
        let response = tiny_http::Response::from_string(body)
            .with_status_code(status)
            .with_header(
                tiny_http::Header::from_bytes("Content-Type", "application/json").expect("header"),
            );
        request.respond(response).expect("respond");
        captured
    });
    (format!("http://127.0.0.1:{port}"), handle)
}

fn api(base_url: String, mode: LoginMode) -> ApiConfig {
    ApiConfig {
        base_url,
        login_mode: mode,
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn json_login_sends_identity_twice_and_stores_token() {
    let (base, handle) = serve_once(
        200,
        r#"{"access_token":"tok-123","token_type":"bearer","name":"Ana","role":"admin","plan":"pro","company_id":1}"#,
    );
    let store = MemoryTokenStore::default();

    let session = login_and_store(
        &reqwest::Client::new(),
        &api(base, LoginMode::Json),
        &store,
        "ana@empresa.com",
        "segredo",
    )
    .await
    .expect("login");

    let captured = handle.join().expect("server thread");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/auth/login");
    let sent: serde_json::Value = serde_json::from_str(&captured.body).expect("json body");
    assert_eq!(
        sent,
        serde_json::json!({
            "email": "ana@empresa.com",
            "username": "ana@empresa.com",
            "password": "segredo",
        })
    );
    assert_eq!(session.name.as_deref(), Some("Ana"));
    assert_eq!(store.load().as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn form_login_posts_password_grant() {
    let (base, handle) = serve_once(200, r#""raw-token""#);

    let session = login(
        &reqwest::Client::new(),
        &api(base, LoginMode::Form),
        "ana",
        "s3nha",
    )
    .await
    .expect("login");

    let captured = handle.join().expect("server thread");
    assert_eq!(captured.url, "/api/login");
    assert_eq!(
        captured.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        captured.body,
        "grant_type=password&username=ana&password=s3nha"
    );
    assert_eq!(session.access_token, "raw-token");
}

#[tokio::test]
async fn status_codes_map_to_login_errors() {
    let client = reqwest::Client::new();

    let (base, handle) = serve_once(401, r#"{"detail":"bad"}"#);
    let err = login(&client, &api(base, LoginMode::Json), "a", "b")
        .await
        .unwrap_err();
    handle.join().expect("server thread");
    assert!(matches!(err, AuthError::InvalidCredentials), "{err}");

    let (base, handle) = serve_once(422, r#"{"detail":[{"loc":["body","email"]}]}"#);
    let err = login(&client, &api(base, LoginMode::Json), "a", "b")
        .await
        .unwrap_err();
    handle.join().expect("server thread");
    assert!(matches!(err, AuthError::Validation(ref m) if m.contains("email")), "{err}");

    let (base, handle) = serve_once(404, r#"{"detail":"Not Found"}"#);
    let err = login(&client, &api(base, LoginMode::Json), "a", "b")
        .await
        .unwrap_err();
    handle.join().expect("server thread");
    assert_eq!(err.to_string(), "login route /auth/login not found (404)");

    let (base, handle) = serve_once(400, r#"{"detail":"Senha incorreta"}"#);
    let err = login(&client, &api(base, LoginMode::Json), "a", "b")
        .await
        .unwrap_err();
    handle.join().expect("server thread");
    assert!(
        matches!(err, AuthError::LoginFailed { status: 400, ref message } if message.contains("Senha")),
        "{err}"
    );
}

#[tokio::test]
async fn success_without_token_is_not_stored() {
    let (base, handle) = serve_once(200, r#"{"detail":"ok"}"#);
    let store = MemoryTokenStore::default();

    let err = login_and_store(
        &reqwest::Client::new(),
        &api(base, LoginMode::Json),
        &store,
        "a",
        "b",
    )
    .await
    .unwrap_err();

    handle.join().expect("server thread");
    assert!(matches!(err, AuthError::UnexpectedResponse(_)), "{err}");
    assert!(store.load().is_none());
}
