//! In-process fake backend on `tiny_http`.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use sst_auth::MemoryTokenStore;
use sst_client::ApiClient;
use sst_config::ApiConfig;

#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub struct FakeBackend {
    pub base_url: String,
    server: Arc<tiny_http::Server>,
    log: Arc<Mutex<Vec<Received>>>,
    thread: Option<JoinHandle<()>>,
}

impl FakeBackend {
    /// Answer every request with `handler(request) -> (status, body)`.
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Received) -> (u16, String) + Send + 'static,
    {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind"));
        let port = server.server_addr().to_ip().expect("ip addr").port();
        let log = Arc::new(Mutex::new(Vec::new()));

        let thread = {
            let server = Arc::clone(&server);
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    request
                        .as_reader()
                        .read_to_string(&mut body)
                        .expect("read body");
                    let received = Received {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                        authorization: request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv("Authorization"))
                            .map(|h| h.value.to_string()),
                        body,
                    };
                    let (status, reply) = handler(&received);
                    log.lock().expect("log lock").push(received);
                    let response = tiny_http::Response::from_string(reply)
                        .with_status_code(status)
                        .with_header(
                            tiny_http::Header::from_bytes("Content-Type", "application/json")
                                .expect("header"),
                        );
                    request.respond(response).expect("respond");
                }
            })
        };

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            server,
            log,
            thread: Some(thread),
        }
    }

    pub fn requests(&self) -> Vec<Received> {
        self.log.lock().expect("log lock").clone()
    }

    pub fn client(&self, store: Arc<MemoryTokenStore>) -> ApiClient {
        let api = ApiConfig {
            base_url: self.base_url.clone(),
            ..ApiConfig::default()
        };
        ApiClient::new(&api, store).expect("client")
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
