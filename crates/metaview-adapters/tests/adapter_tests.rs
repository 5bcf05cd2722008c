//! Adapter tests against a one-shot local HTTP server.

use std::sync::Arc;

use metaview_adapters::{HttpFetcher, KrokiRenderer, MemorySlots, PushListener, push::UNSUPPORTED};
use metaview_core::{
    application::{
        ApplicationError,
        ports::{DiagramRenderer, RenderRequest, ResourceFetcher, SlotContent, SlotId},
    },
    domain::{DiagramText, Link},
    error::{ErrorCategory, MetaviewError},
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn http_response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Accept one connection, answer with `response`, return the raw request.
async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{addr}"), task)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn body_of(request: &str) -> &str {
    request.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default()
}

// ── HttpFetcher ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetcher_sends_accept_and_basic_auth() {
    let (base, server) = serve_once(http_response(
        "200 OK",
        "application/json",
        r#"{"userName": "sven"}"#,
    ))
    .await;

    let fetcher = HttpFetcher::new().unwrap().with_credentials("sven", "pass");
    let body = fetcher
        .fetch(&Link::new("self", format!("{base}/restful/user")))
        .await
        .unwrap();
    assert_eq!(body, r#"{"userName": "sven"}"#);

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("get /restful/user "));
    assert!(request.contains("accept: application/json"));
    assert!(request.contains("authorization: basic c3ZlbjpwYXNz"));
}

#[tokio::test]
async fn fetcher_reports_status() {
    let (base, server) = serve_once(http_response("401 Unauthorized", "text/plain", "nope")).await;

    let err = HttpFetcher::new()
        .unwrap()
        .fetch(&Link::new("self", format!("{base}/restful/user")))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(matches!(
        err,
        MetaviewError::Application(ApplicationError::FetchFailed {
            status: Some(401),
            ..
        })
    ));
    assert_eq!(err.category(), ErrorCategory::Network);
}

// ── KrokiRenderer ────────────────────────────────────────────────────────────

#[tokio::test]
async fn renderer_posts_json_request() {
    let (base, server) = serve_once(http_response("200 OK", "image/svg+xml", "<svg/>")).await;

    let renderer = KrokiRenderer::new().with_endpoint(format!("{base}/"));
    let request = RenderRequest::new(&DiagramText::new("@startuml\nclass A\n@enduml"));
    let svg = renderer.render(&request).await.unwrap();
    assert_eq!(svg, "<svg/>");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST / "));
    let body: serde_json::Value = serde_json::from_str(body_of(&raw)).unwrap();
    assert_eq!(body["diagram_source"], "@startuml\nclass A\n@enduml");
    assert_eq!(body["diagram_type"], "plantuml");
    assert_eq!(body["output_format"], "svg");
}

#[tokio::test]
async fn renderer_failure_carries_response_body() {
    let (base, server) = serve_once(http_response(
        "400 Bad Request",
        "text/plain",
        "Syntax Error? (line 2)",
    ))
    .await;

    let err = KrokiRenderer::new()
        .with_endpoint(base)
        .render(&RenderRequest::new(&DiagramText::new("@startuml")))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(err.to_string().contains("Syntax Error? (line 2)"));
}

// ── PushListener ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn push_without_endpoint_reports_unsupported() {
    let slots = MemorySlots::new();
    let slot = SlotId::new("push");
    let delivered = PushListener::new(None, Arc::new(slots.clone()), slot.clone())
        .listen()
        .await
        .unwrap();

    assert_eq!(delivered, 0);
    assert_eq!(slots.get(&slot), Some(SlotContent::Text(UNSUPPORTED.into())));
}

#[tokio::test]
async fn push_messages_are_decoded_into_the_slot() {
    let (base, server) = serve_once(http_response(
        "200 OK",
        "text/event-stream",
        "data: SGVsbG8=\n\ndata: d29ybGQ=\n\n",
    ))
    .await;

    let slots = MemorySlots::new();
    let slot = SlotId::new("push");
    let delivered = PushListener::new(Some(format!("{base}/push")), Arc::new(slots.clone()), slot.clone())
        .spawn()
        .await
        .unwrap()
        .unwrap();
    server.await.unwrap();

    assert_eq!(delivered, 2);
    assert_eq!(slots.update_count(), 2);
    assert_eq!(slots.get(&slot), Some(SlotContent::Text("world".into())));
}
