//! Minimal HTTP/1.1 stand-in for the companion app's `/add` endpoint.
//!
//! Records each request target (e.g. `/add?url=...`) and answers every request
//! with a fixed status and a short body.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub struct CompanionServer {
    pub port: u16,
    targets: Arc<Mutex<Vec<String>>>,
}

impl CompanionServer {
    /// Request targets seen so far, in arrival order.
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

/// Starts a server answering `200 OK`. Runs until the process exits.
pub fn start() -> CompanionServer {
    start_with_status(200)
}

pub fn start_with_status(status: u16) -> CompanionServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let targets = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&targets);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, status, &seen));
        }
    });
    CompanionServer { port, targets }
}

/// A port on loopback with nothing listening (bound once, then released).
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn handle(mut stream: std::net::TcpStream, status: u16, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    if let Some(target) = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
    {
        seen.lock().unwrap().push(target.to_string());
    }
    let body = if status < 400 { "OK" } else { "ERR" };
    let response = format!(
        "HTTP/1.1 {} Status\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
