//! Minimal HTTP servers for exercising the HTTP adapters offline.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A server answering every request with the same canned response.
pub struct CannedServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Serve `body` with the given HTTP status line, e.g. `"200 OK"`.
    pub fn start(status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let target = read_request_target(&stream);
                seen.lock().expect("request log").push(target);
                respond(stream, status, body);
            }
        });
        Self { addr, requests }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request targets (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log").clone()
    }
}

/// Start a server that accepts connections but never answers.
pub fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            held.push(stream);
            thread::sleep(Duration::from_millis(10));
        }
    });
    format!("http://{addr}")
}

fn read_request_target(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");
    loop {
        let mut header = String::new();
        let read = reader.read_line(&mut header).expect("header line");
        if read == 0 || header == "\r\n" {
            break;
        }
    }
    request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_owned()
}

fn respond(mut stream: TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).expect("write response");
    stream.flush().expect("flush response");
}

/// A successful two-leg directions response.
pub const TWO_LEG_ROUTE: &str = r#"{
    "status": "OK",
    "routes": [{
        "overview_polyline": { "points": "a~l~Fjk~uOwHJy@P" },
        "waypoint_order": [0],
        "legs": [
            { "distance": { "text": "0.9 km", "value": 912 }, "duration": { "text": "12 mins", "value": 701 } },
            { "distance": { "text": "1.2 km", "value": 1204 }, "duration": { "text": "15 mins", "value": 905 } }
        ]
    }]
}"#;

/// A response reporting that no route exists.
pub const ZERO_RESULTS: &str = r#"{ "status": "ZERO_RESULTS", "routes": [] }"#;
