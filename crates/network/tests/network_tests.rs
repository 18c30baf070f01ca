// crates/network/tests/network_tests.rs
//! Integration tests for the reqwest transports against a local socket

use futures::{FutureExt, StreamExt};
use resync_core::{Direction, ProgressEvent, ProgressPhase};
use resync_network::{
    ClientConfig, CredentialsMode, Exchange, FetchTransport, HttpClient, Method, PreparedRequest,
    ProgressTransport, RequestConfig, RequestDescriptor, ResponseStrategy, Transport, TransportError,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn test_client() -> HttpClient {
    HttpClient::with_config(ClientConfig {
        use_env_proxy: false,
        ..ClientConfig::default()
    })
    .expect("Failed to create client")
}

fn prepare(descriptor: &RequestDescriptor) -> PreparedRequest {
    RequestConfig::new(descriptor).build().expect("valid headers")
}

/// Accepts one connection, records the raw request and answers with a canned response
async fn serve_once(
    status_line: &'static str,
    content_type: Option<&'static str>,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;

        let mut response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
            status_line,
            body.len()
        );
        if let Some(content_type) = content_type {
            response.push_str(&format!("Content-Type: {}\r\n", content_type));
        }
        response.push_str("\r\n");
        response.push_str(body);

        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        let Some(head_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let head = text[..head_end].to_ascii_lowercase();

        if head.contains("transfer-encoding: chunked") {
            if text.ends_with("0\r\n\r\n") {
                break;
            }
            continue;
        }

        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= head_end + 4 + content_length {
            break;
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

/// Progress already pushed by the transport, without waiting for the stream to close
fn drain(exchange_progress: &mut futures::stream::BoxStream<'static, ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Some(Some(event)) = exchange_progress.next().now_or_never() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_fetch_transport_get_json() {
    let (url, server) = serve_once("200 OK", Some("application/json"), "{\"id\":1,\"username\":\"Bob\"}").await;
    let transport = FetchTransport::new(test_client());
    let descriptor = RequestDescriptor::new(format!("{}/users/1", url));

    let Exchange { mut progress, response } = transport.send(prepare(&descriptor));
    let raw = response.await.expect("response");

    assert_eq!(raw.status, 200);
    assert_eq!(raw.status_text, "OK");
    assert!(raw.is_json());
    assert!(drain(&mut progress).is_empty());

    let normalized = ResponseStrategy::Default.normalize(&raw).await.expect("normalize");
    assert_eq!(normalized.values, serde_json::json!({ "id": 1, "username": "Bob" }));
    assert!(normalized.error.is_none());

    let request = server.await.expect("server").to_ascii_lowercase();
    assert!(request.starts_with("get /users/1 http/1.1"));
    assert!(request.contains("accept: application/json"));
    assert!(request.contains("content-type: application/json"));
}

#[tokio::test]
async fn test_fetch_transport_sends_cookie_header() {
    let (url, server) = serve_once("204 No Content", None, "").await;
    let transport = FetchTransport::new(test_client());
    let descriptor = RequestDescriptor::new(url)
        .with_credentials(true)
        .with_cookie("session=abc");
    let prepared = prepare(&descriptor);
    assert_eq!(prepared.credentials, CredentialsMode::Omit);

    let raw = transport.send(prepared).response.await.expect("response");
    assert_eq!(raw.status, 204);

    let request = server.await.expect("server").to_ascii_lowercase();
    assert!(request.contains("cookie: session=abc"));
}

#[tokio::test]
async fn test_fetch_transport_error_status_is_a_response() {
    let (url, _server) = serve_once("404 Not Found", Some("application/json"), "{\"error\":\"Not Found\"}").await;
    let transport = FetchTransport::new(test_client());
    let descriptor = RequestDescriptor::new(url);

    let raw = transport
        .send(prepare(&descriptor))
        .response
        .await
        .expect("response");

    assert_eq!(raw.status, 404);
    let normalized = ResponseStrategy::Default.normalize(&raw).await.expect("normalize");
    assert_eq!(normalized.error.expect("error")["message"], "Not Found");
}

#[tokio::test]
async fn test_progress_transport_reports_upload_then_download() {
    let (url, server) = serve_once("201 Created", Some("application/json"), "{\"ok\":true}").await;
    let transport = ProgressTransport::new(test_client()).with_chunk_size(4);
    let descriptor = RequestDescriptor::new(format!("{}/upload", url))
        .with_method(Method::POST)
        .with_body("0123456789");

    let Exchange { mut progress, response } = transport.send(prepare(&descriptor));
    let raw = response.await.expect("response");
    let events = drain(&mut progress);

    assert_eq!(raw.status, 201);
    assert_eq!(raw.json().expect("json"), serde_json::json!({ "ok": true }));

    let uploads: Vec<&ProgressEvent> = events.iter().filter(|e| e.direction == Direction::Up).collect();
    let loaded: Vec<u64> = uploads.iter().map(|e| e.loaded).collect();
    assert_eq!(loaded, vec![4, 8, 10, 10]);
    assert_eq!(uploads.last().map(|e| e.phase), Some(ProgressPhase::LoadEnd));

    let first_down = events
        .iter()
        .position(|e| e.direction == Direction::Down)
        .expect("download progress");
    assert!(events[..first_down].iter().all(|e| e.direction == Direction::Up));
    let last = events.last().expect("events");
    assert_eq!(last.direction, Direction::Down);
    assert_eq!(last.loaded, 11);
    assert_eq!(last.total, Some(11));

    let request = server.await.expect("server");
    assert!(request.ends_with("0\r\n\r\n") || request.contains("0123456789"));
}

#[tokio::test]
async fn test_progress_transport_defaults_content_type() {
    let (url, _server) = serve_once("200 OK", None, "[1,2]").await;
    let transport = ProgressTransport::new(test_client());
    let descriptor = RequestDescriptor::new(url);

    let raw = transport
        .send(prepare(&descriptor))
        .response
        .await
        .expect("response");

    assert!(raw.is_json());
    assert_eq!(raw.json().expect("json"), serde_json::json!([1, 2]));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let transport = FetchTransport::new(test_client());
    let descriptor = RequestDescriptor::new(format!("http://{}/users", addr));
    let result = transport.send(prepare(&descriptor)).response.await;

    assert!(matches!(result, Err(TransportError::Request(_))));
}
