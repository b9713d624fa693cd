//! Shared helpers: a one-shot mock OneTimeSecret server on localhost.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ots::{Client, Credentials};
use tiny_http::{Header, Response, Server};

pub const USERNAME: &str = "tester@example.com";
pub const TOKEN: &str = "test-token";

/// A request as the mock server saw it.
#[derive(Debug)]
pub struct Captured {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Captured {
    /// Decode the body as `application/x-www-form-urlencoded` pairs.
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn form_value(&self, key: &str) -> Option<String> {
        self.form()
            .into_iter()
            .find_map(|(k, v)| if k == key { Some(v) } else { None })
    }
}

/// Mock server answering a fixed list of responses, one per request.
pub struct MockServer {
    pub base_url: String,
    handle: JoinHandle<Vec<Captured>>,
}

impl MockServer {
    /// Start a server that answers each incoming request with the next
    /// `(status, body)` pair, then shuts down.
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let mut responses = responses.into_iter();
        let count = responses.len();
        Self::respond_with(count, move |_| {
            let (status, body) = responses.next().expect("one response per request");
            (status, body.to_string())
        })
    }

    /// Start a server that answers `count` requests, building each
    /// response from the request it received.
    pub fn respond_with<F>(count: usize, mut respond: F) -> Self
    where
        F: FnMut(&Captured) -> (u16, String) + Send + 'static,
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let server = Server::http("127.0.0.1:0").expect("bind mock server");
        let addr = server
            .server_addr()
            .to_ip()
            .expect("mock server has an IP address");
        let base_url = format!("http://{addr}/api/v1");

        let handle = thread::spawn(move || {
            let mut captured = Vec::new();
            for _ in 0..count {
                let mut request = match server.recv_timeout(Duration::from_secs(5)) {
                    Ok(Some(request)) => request,
                    _ => break,
                };

                let mut request_body = String::new();
                request
                    .as_reader()
                    .read_to_string(&mut request_body)
                    .expect("read request body");

                let seen = Captured {
                    method: request.method().as_str().to_string(),
                    url: request.url().to_string(),
                    authorization: header(request.headers(), "Authorization"),
                    content_type: header(request.headers(), "Content-Type"),
                    body: request_body,
                };
                let (status, body) = respond(&seen);
                captured.push(seen);

                let json = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("valid header");
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(json);
                request.respond(response).expect("send mock response");
            }
            captured
        });

        Self { base_url, handle }
    }

    /// Single `200 OK` response.
    pub fn ok(body: &'static str) -> Self {
        Self::start(vec![(200, body)])
    }

    /// Client for the test account pointed at this server.
    pub fn client(&self) -> Client {
        Client::with_base_url(Credentials::new(USERNAME, TOKEN), self.base_url.clone())
    }

    /// Wait for the server to finish and return what it received.
    pub fn finish(self) -> Vec<Captured> {
        self.handle.join().expect("mock server thread panicked")
    }

    /// Wait for the server and return the only request it received.
    pub fn single(self) -> Captured {
        let mut captured = self.finish();
        assert_eq!(captured.len(), 1, "expected exactly one request");
        captured.remove(0)
    }
}

fn header(headers: &[Header], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str().to_string())
}

/// Expected `Authorization` header for the test account.
pub fn expected_auth() -> String {
    // base64("tester@example.com:test-token")
    "Basic dGVzdGVyQGV4YW1wbGUuY29tOnRlc3QtdG9rZW4=".to_string()
}

/// A base URL on a port nothing is listening on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/api/v1")
}

/// A raw server that promises a longer body than it sends, then hangs up.
pub fn truncated_body_server() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind raw listener");
    let addr = listener.local_addr().expect("raw address");

    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            stream
                .set_read_timeout(Some(Duration::from_millis(500)))
                .ok();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{\"secret_key\":",
            );
            let _ = stream.flush();
        }
    });

    (format!("http://{addr}/api/v1"), handle)
}
