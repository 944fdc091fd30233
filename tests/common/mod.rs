//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use futures_util::FutureExt;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use notification_gateway::backend::OperationHandler;
use notification_gateway::dispatch::{OperationResult, ResultFuture};
use notification_gateway::envelope::{RequestEnvelope, TransportContext};

/// What a [`StubBackend`] answers with.
#[derive(Clone)]
pub enum Reply {
    /// `200` echoing the envelope's params, headers and operation.
    Echo,
    /// A fixed result, returned as-is.
    Fixed(OperationResult),
}

/// Backend stub that counts calls and records every envelope it receives.
pub struct StubBackend {
    calls: AtomicUsize,
    seen: Mutex<Vec<RequestEnvelope>>,
    delay: Duration,
    reply: Reply,
}

impl StubBackend {
    pub fn echo() -> Arc<Self> {
        Self::with(Reply::Echo, Duration::ZERO)
    }

    pub fn with(reply: Reply, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            delay,
            reply,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The last envelope received.
    pub fn last(&self) -> RequestEnvelope {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("backend was never called")
    }
}

impl OperationHandler for StubBackend {
    fn handle(&self, envelope: RequestEnvelope, transport: &TransportContext) -> ResultFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(envelope.clone());

        let reply = match &self.reply {
            Reply::Echo => OperationResult::success(
                envelope.operation,
                transport.request_id(),
                json!({
                    "operation": envelope.operation,
                    "params": envelope.parameters,
                    "headers": envelope.headers,
                }),
            ),
            Reply::Fixed(result) => result.clone(),
        };
        let delay = self.delay;

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply
        }
        .boxed()
    }
}

/// A request captured by the mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Start a mock upstream on an ephemeral port answering every request with
/// `(status, content_type, body)`. Captured requests are sent on the channel.
pub async fn start_mock_upstream(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Some(captured) = read_request(&mut socket).await {
                            let _ = tx.send(captured);
                        }
                        let reason = StatusCode::from_u16(status)
                            .ok()
                            .and_then(|s| s.canonical_reason())
                            .unwrap_or("Unknown");
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
                            content_type,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = (body_start + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[body_start..body_end]).to_string();

    Some(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}

/// Start an upstream that accepts connections but never answers.
pub async fn start_silent_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
