use courier::client::response::{MAX_HEAD_BYTES, parse_content_length, parse_status_line};
use courier::client::{BodyFraming, ClientError, ResponseHead, read_head};
use tokio::io::AsyncReadExt;

#[tokio::test]
async fn test_read_head_status_and_length() {
    let mut reader: &[u8] =
        b"HTTP/1.0 200 OK\r\nContent-Length: 10\r\nContent-Type: text/html\r\n\r\n0123456789";

    let head = read_head(&mut reader).await.unwrap();

    assert_eq!(
        head,
        ResponseHead {
            status: 200,
            content_length: Some(10),
            chunked: false,
        }
    );
    assert_eq!(head.framing(), BodyFraming::Length(10));
    assert_eq!(reader, b"0123456789");
}

#[tokio::test]
async fn test_read_head_accepts_bare_lf() {
    let mut reader: &[u8] = b"HTTP/1.1 404 Not Found\ncontent-length: 3\n\nabc";

    let head = read_head(&mut reader).await.unwrap();

    assert_eq!(head.status, 404);
    assert_eq!(head.content_length, Some(3));
    assert_eq!(reader, b"abc");
}

#[tokio::test]
async fn test_read_head_without_framing_headers_reads_to_close() {
    let mut reader: &[u8] = b"HTTP/1.0 200 OK\r\nServer: x\r\n\r\nbody";

    let head = read_head(&mut reader).await.unwrap();

    assert_eq!(head.content_length, None);
    assert!(!head.chunked);
    assert_eq!(head.framing(), BodyFraming::UntilClose);
}

#[tokio::test]
async fn test_read_head_detects_chunked_case_insensitively() {
    let mut reader: &[u8] = b"HTTP/1.1 200 OK\r\nTRANSFER-ENCODING: gzip, Chunked\r\n\r\n";

    let head = read_head(&mut reader).await.unwrap();

    assert!(head.chunked);
    assert_eq!(head.framing(), BodyFraming::Chunked);
}

#[tokio::test]
async fn test_content_length_wins_over_chunked() {
    let mut reader: &[u8] =
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nContent-Length: 5\r\n\r\n";

    let head = read_head(&mut reader).await.unwrap();

    assert!(head.chunked);
    assert_eq!(head.framing(), BodyFraming::Length(5));
}

#[tokio::test]
async fn test_zero_content_length_reads_to_close() {
    let mut reader: &[u8] = b"HTTP/1.0 200 OK\r\nContent-Length: 0\r\n\r\n";

    let head = read_head(&mut reader).await.unwrap();

    assert_eq!(head.content_length, Some(0));
    assert_eq!(head.framing(), BodyFraming::UntilClose);
}

#[tokio::test]
async fn test_read_head_empty_response() {
    let mut reader: &[u8] = b"";

    let result = read_head(&mut reader).await;

    assert!(matches!(result, Err(ClientError::EmptyResponse)));
}

#[tokio::test]
async fn test_read_head_malformed_status_line() {
    let mut reader: &[u8] = b"SPDY/3 200 OK\r\n\r\n";

    let result = read_head(&mut reader).await;

    assert!(matches!(result, Err(ClientError::MalformedStatusLine(_))));
}

#[tokio::test]
async fn test_read_head_eof_before_blank_line() {
    let mut reader: &[u8] = b"HTTP/1.0 200 OK\r\nContent-Length: 4\r\n";

    let head = read_head(&mut reader).await.unwrap();

    assert_eq!(head.content_length, Some(4));
}

#[tokio::test]
async fn test_read_head_too_large() {
    let mut response = b"HTTP/1.0 200 OK\r\nX-Filler: ".to_vec();
    response.extend(std::iter::repeat_n(b'a', MAX_HEAD_BYTES));
    response.extend_from_slice(b"\r\n\r\n");
    let mut reader: &[u8] = &response;

    let result = read_head(&mut reader).await;

    assert!(matches!(result, Err(ClientError::HeadTooLarge(_))));
}

#[tokio::test]
async fn test_read_head_leaves_body_untouched() {
    let mut reader: &[u8] = b"HTTP/1.0 200 OK\r\n\r\n\r\nline two\r\n";

    read_head(&mut reader).await.unwrap();
    let mut rest = String::new();
    reader.read_to_string(&mut rest).await.unwrap();

    assert_eq!(rest, "\r\nline two\r\n");
}

#[test]
fn test_parse_status_line() {
    assert_eq!(parse_status_line("HTTP/1.0 200 OK").unwrap(), 200);
    assert_eq!(parse_status_line("HTTP/1.1 301 Moved Permanently").unwrap(), 301);
    assert_eq!(parse_status_line("HTTP/1.1 200abc").unwrap(), 200);
}

#[test]
fn test_parse_status_line_out_of_range_code_is_still_a_code() {
    assert_eq!(parse_status_line("HTTP/1.0 70000 X").unwrap(), 70000);
    assert_eq!(parse_status_line("HTTP/1.0 99999999999999").unwrap(), u32::MAX);
}

#[test]
fn test_parse_status_line_failures() {
    for line in ["", "HTTP/1.0", "HTTP/1.0 OK", "http/1.0 200 OK"] {
        assert!(
            matches!(parse_status_line(line), Err(ClientError::MalformedStatusLine(_))),
            "{line:?} should be malformed"
        );
    }
}

#[test]
fn test_parse_content_length_leading_digits() {
    assert_eq!(parse_content_length("1234"), 1234);
    assert_eq!(parse_content_length("  77  "), 77);
    assert_eq!(parse_content_length("12abc"), 12);
    assert_eq!(parse_content_length("-5"), 0);
    assert_eq!(parse_content_length(""), 0);
    assert_eq!(parse_content_length("99999999999999999999999"), u64::MAX);
}

#[test]
fn test_apply_header_ignores_unknown_and_malformed() {
    let mut head = ResponseHead::default();

    head.apply_header("X-Content-Length: 5");
    head.apply_header("no colon here");
    head.apply_header("Content-Type: chunked/weird");

    assert_eq!(head, ResponseHead::default());
}
