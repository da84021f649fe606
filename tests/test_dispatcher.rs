use courier::http::Method;
use courier::server::writer::NOT_FOUND_BODY;
use courier::server::{RequestDispatcher, ServeError, parse_request_line};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn site() -> (TempDir, RequestDispatcher) {
    let dir = tempfile::tempdir().unwrap();
    let root: PathBuf = fs::canonicalize(dir.path()).unwrap();
    fs::write(root.join("a.html"), b"<b>hi</b>!").unwrap();
    fs::write(root.join("notes.txt"), b"notes").unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs/index.html"), b"docs index").unwrap();
    (dir, RequestDispatcher::new(root, 8192))
}

async fn roundtrip(dispatcher: &RequestDispatcher, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(4096);
    client.write_all(request).await.unwrap();

    let (served, response) = tokio::join!(dispatcher.serve(server), async {
        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        response
    });
    served.unwrap();
    response
}

fn not_found_response() -> Vec<u8> {
    format!(
        "HTTP/1.0 404 Not Found\r\nContent-Length: {}\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n{}",
        NOT_FOUND_BODY.len(),
        NOT_FOUND_BODY
    )
    .into_bytes()
}

#[test]
fn test_parse_request_line_get() {
    let line = parse_request_line(b"GET /a.html HTTP/1.0\r\nHost: x\r\n\r\n").unwrap();

    assert_eq!(line.method, Method::GET);
    assert_eq!(line.target, "/a.html");
}

#[test]
fn test_parse_request_line_ignores_missing_version() {
    let line = parse_request_line(b"GET /\r\n").unwrap();

    assert_eq!(line.target, "/");
}

#[test]
fn test_parse_request_line_rejects_other_methods() {
    for request in [&b"POST / HTTP/1.0\r\n"[..], b"get / HTTP/1.0\r\n", b"BREW /pot HTTP/1.0\r\n"] {
        assert!(matches!(
            parse_request_line(request),
            Err(ServeError::UnsupportedMethod(_))
        ));
    }
}

#[test]
fn test_parse_request_line_reports_refused_token() {
    let result = parse_request_line(b"DELETE /a.html HTTP/1.0\r\n");

    assert!(matches!(result, Err(ServeError::UnsupportedMethod(token)) if token == "DELETE"));
}

#[test]
fn test_parse_request_line_malformed() {
    for request in [&b""[..], b"\r\n", b"GET\r\n/a.html HTTP/1.0\r\n"] {
        assert!(matches!(
            parse_request_line(request),
            Err(ServeError::MalformedRequestLine)
        ));
    }
}

#[tokio::test]
async fn test_serves_file() {
    let (_dir, dispatcher) = site();

    let response = roundtrip(&dispatcher, b"GET /a.html HTTP/1.0\r\n\r\n").await;

    assert_eq!(
        response,
        b"HTTP/1.0 200 OK\r\nContent-Length: 10\r\nContent-Type: text/html; charset=utf-8\r\nConnection: close\r\n\r\n<b>hi</b>!"
    );
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let (_dir, dispatcher) = site();

    let response = roundtrip(&dispatcher, b"GET /missing.txt HTTP/1.0\r\n\r\n").await;

    assert_eq!(response, not_found_response());
}

#[tokio::test]
async fn test_traversal_is_404() {
    let (_dir, dispatcher) = site();

    let response = roundtrip(&dispatcher, b"GET /../etc/passwd HTTP/1.0\r\n\r\n").await;

    assert_eq!(response, not_found_response());
}

#[tokio::test]
async fn test_root_listing() {
    let (_dir, dispatcher) = site();

    let response = roundtrip(&dispatcher, b"GET / HTTP/1.0\r\n\r\n").await;
    let response = String::from_utf8(response).unwrap();
    let (head, body) = response.split_once("\r\n\r\n").unwrap();

    assert!(head.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(head.contains(&format!("Content-Length: {}\r\n", body.len())));
    assert!(head.contains("Content-Type: text/html; charset=utf-8\r\n"));
    for name in ["..", "a.html", "notes.txt", "docs"] {
        assert!(body.contains(&format!("<a href=\"//{name}\">{name}</a>")), "{name} missing");
    }
    assert!(!body.contains("<a href=\"//.\">"));
}

#[tokio::test]
async fn test_directory_index_served_instead_of_listing() {
    let (_dir, dispatcher) = site();

    let response = roundtrip(&dispatcher, b"GET /docs HTTP/1.0\r\n\r\n").await;

    assert!(response.ends_with(b"\r\n\r\ndocs index"));
    assert!(!String::from_utf8_lossy(&response).contains("Index of"));
}

#[tokio::test]
async fn test_non_get_is_404() {
    let (_dir, dispatcher) = site();

    let response = roundtrip(&dispatcher, b"POST /a.html HTTP/1.0\r\nContent-Length: 0\r\n\r\n").await;

    assert_eq!(response, not_found_response());
}

#[tokio::test]
async fn test_malformed_request_is_404() {
    let (_dir, dispatcher) = site();

    let response = roundtrip(&dispatcher, b"GARBAGE\r\n\r\n").await;

    assert_eq!(response, not_found_response());
}

#[tokio::test]
async fn test_request_line_split_across_writes() {
    let (_dir, dispatcher) = site();
    let (mut client, server) = tokio::io::duplex(4096);

    let (served, response) = tokio::join!(dispatcher.serve(server), async {
        client.write_all(b"GET /not").await.unwrap();
        tokio::task::yield_now().await;
        client.write_all(b"es.txt HTTP/1.0\r\n\r\n").await.unwrap();
        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        response
    });
    served.unwrap();

    assert!(response.starts_with(b"HTTP/1.0 200 OK\r\n"));
    assert!(response.ends_with(b"\r\n\r\nnotes"));
}

#[tokio::test]
async fn test_peer_closing_without_request_gets_nothing() {
    let (_dir, dispatcher) = site();
    let (mut client, server) = tokio::io::duplex(64);
    client.shutdown().await.unwrap();

    dispatcher.serve(server).await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();

    assert!(response.is_empty());
}

#[tokio::test]
async fn test_same_request_twice_is_identical() {
    let (_dir, dispatcher) = site();

    let first = roundtrip(&dispatcher, b"GET / HTTP/1.0\r\n\r\n").await;
    let second = roundtrip(&dispatcher, b"GET / HTTP/1.0\r\n\r\n").await;

    assert_eq!(first, second);
}
