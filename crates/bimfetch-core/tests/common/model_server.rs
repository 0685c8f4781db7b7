//! Minimal HTTP/1.1 server that serves model files for integration tests.
//!
//! Each route maps a request path to a canned response. Unknown paths get
//! `404 Not Found`. Routes can delay their response to control completion
//! order across concurrent fetches.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    /// Status line after `HTTP/1.1 `, e.g. `200 OK`.
    pub status: &'static str,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
    /// Sent as `Location` (for 3xx routes).
    pub location: Option<String>,
}

impl Route {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: "200 OK",
            body: body.to_vec(),
            delay: None,
            location: None,
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay: None,
            location: None,
        }
    }

    pub fn redirect(to: &str) -> Self {
        Self {
            status: "302 Found",
            body: Vec::new(),
            delay: None,
            location: Some(to.to_string()),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Handle to a running server.
pub struct ModelServer {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:12345`.
    pub base: String,
    hits: Arc<AtomicUsize>,
}

impl ModelServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> ModelServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || {
                hits.fetch_add(1, Ordering::SeqCst);
                handle(stream, &routes)
            });
        }
    });
    ModelServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request_path(request);
    let not_found = Route::status("404 Not Found");
    let route = routes.get(path).unwrap_or(&not_found);
    if let Some(d) = route.delay {
        thread::sleep(d);
    }
    let location = route
        .location
        .as_deref()
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        route.body.len(),
        location
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

/// Path of `GET /path HTTP/1.1`, without query string.
fn request_path(request: &str) -> &str {
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");
    target.split('?').next().unwrap_or(target)
}
