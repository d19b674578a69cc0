//! Local HTTP stand-in for the Twitch token endpoint and the IGDB API.
#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clz_igdb::IgdbConfig;
use tiny_http::{Header, Response, Server};

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct MockServer {
    pub url: String,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    /// Serve every request with `handler`, which returns (status, JSON body).
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock server"));
        let port = server
            .server_addr()
            .to_ip()
            .expect("mock server has an IP address")
            .port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let thread_server = Arc::clone(&server);
        let thread_requests = Arc::clone(&requests);
        std::thread::spawn(move || {
            for mut request in thread_server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let recorded = Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.as_str().to_string(), h.value.as_str().to_string()))
                        .collect(),
                    body,
                };

                let (status, payload) = handler(&recorded);
                thread_requests.lock().unwrap().push(recorded);

                let content_type =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(content_type);
                let _ = request.respond(response);
            }
        });

        Self {
            url: format!("http://127.0.0.1:{port}"),
            server,
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Config pointing both the auth and the catalog endpoints at this server.
    pub fn config(&self) -> IgdbConfig {
        IgdbConfig {
            auth_base_url: self.url.clone(),
            auth_path: "/oauth2/token".to_string(),
            client_id: "client12345id".to_string(),
            client_secret: "client123secret".to_string(),
            base_url: format!("{}/v4", self.url),
            rate_limit: Duration::ZERO,
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

pub const TOKEN_RESPONSE: &str =
    r#"{"access_token": "access12345token", "expires_in": 5587808, "token_type": "bearer"}"#;
