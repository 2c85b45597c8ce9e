//! HTTP/1.1 server that promises more body than it sends.
//!
//! Every GET is answered with `200 OK` and a `Content-Length` larger than
//! the bytes actually written, then the connection is closed.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Starts the server in a background thread. Returns a URL for `path`
/// (e.g. "http://127.0.0.1:12345/cut.jpg").
pub fn start(path: &str, sent: &'static [u8], advertised: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || handle(stream, sent, advertised));
        }
    });
    format!("http://127.0.0.1:{}{}", port, path)
}

fn handle(mut stream: TcpStream, sent: &[u8], advertised: usize) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
        advertised
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(sent);
    let _ = stream.flush();
    let _ = stream.shutdown(std::net::Shutdown::Both);
}
