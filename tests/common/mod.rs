//! Shared utilities for integration testing.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock backend that returns 200 with a fixed body.
///
/// Binds an ephemeral port and returns the address.
#[allow(dead_code)]
pub async fn start_mock_backend(body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    serve_fixed(listener, move || {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    });
    addr
}

/// Start a mock backend that answers every request with a 302 redirect to
/// the given Location value.
#[allow(dead_code)]
pub async fn start_redirecting_backend(location: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    serve_fixed(listener, move || redirect_response(&location));
    addr
}

/// Start a mock that redirects to its own port under a stale hostname, the
/// way the legacy service hardcodes its container identity.
///
/// Emits `Location: http://<hostname>:<own_port><path>`.
#[allow(dead_code)]
pub async fn start_stale_redirecting_backend(hostname: &str, path: &str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let location = format!("http://{}:{}{}", hostname, addr.port(), path);
    serve_fixed(listener, move || redirect_response(&location));
    addr
}

fn redirect_response(location: &str) -> String {
    format!(
        "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        location
    )
}

/// Accept loop writing a fixed response to every connection.
fn serve_fixed<F>(listener: TcpListener, response: F)
where
    F: Fn() -> String + Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let response = response();
                    tokio::spawn(async move {
                        // Drain the request head before answering so the
                        // client never sees a reset mid-request.
                        let mut buf = vec![0u8; 8192];
                        loop {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => {
                                    if buf[..n].windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                            }
                        }
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}
