//! Single-request HTTP server for client tests.
//!
//! Binds an ephemeral localhost port, answers exactly one request with a
//! canned response and hands the raw request text back to the test.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use url::Url;

pub struct OneShotServer {
    base: Url,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    /// Serve `status` (e.g. `"200 OK"`) with extra `headers` and a JSON `body`.
    pub fn respond(status: &str, headers: &[(&str, &str)], body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut response = format!("HTTP/1.1 {status}\r\n");
        response.push_str("content-type: application/json\r\n");
        response.push_str(&format!("content-length: {}\r\n", body.len()));
        response.push_str("connection: close\r\n");
        for (name, value) in headers {
            response.push_str(&format!("{name}: {value}\r\n"));
        }
        response.push_str("\r\n");
        response.push_str(body);

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        Self {
            base: Url::parse(&format!("http://{addr}/v1")).unwrap(),
            handle,
        }
    }

    pub fn base(&self) -> Url {
        self.base.clone()
    }

    /// The request as received, headers lowercased by the client.
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        let body_len = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + body_len {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
