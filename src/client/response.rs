use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use super::ClientError;

/// Upper bound on status line plus headers.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

/// How the body that follows the head is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// Exactly this many bytes (fewer if the server hangs up first).
    Length(u64),
    /// Chunked transfer coding, which the client refuses to decode.
    Chunked,
    /// Everything until the server closes the connection.
    UntilClose,
}

/// Status and the framing-related headers of a response.
///
/// Built up line by line while the head is read, then left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u32,
    pub content_length: Option<u64>,
    pub chunked: bool,
}

impl ResponseHead {
    /// Folds one header line into the head. Unknown headers are ignored.
    pub fn apply_header(&mut self, line: &str) {
        let Some((name, value)) = line.split_once(':') else {
            return;
        };
        let name = name.trim();

        if name.eq_ignore_ascii_case("Content-Length") {
            self.content_length = Some(parse_content_length(value));
        } else if name.eq_ignore_ascii_case("Transfer-Encoding")
            && value.to_ascii_lowercase().contains("chunked")
        {
            self.chunked = true;
        }
    }

    /// A non-zero `Content-Length` wins over `chunked`; a zero or missing
    /// length without `chunked` means read until close.
    pub fn framing(&self) -> BodyFraming {
        match self.content_length {
            Some(len) if len > 0 => BodyFraming::Length(len),
            _ if self.chunked => BodyFraming::Chunked,
            _ => BodyFraming::UntilClose,
        }
    }
}

/// Extracts the status code from `HTTP/<version> <code> <reason...>`.
///
/// The code token only needs to start with digits; `200abc` reads as 200.
/// Out-of-range codes saturate rather than fail, so they surface as
/// `HttpError` like any other non-200 status.
pub fn parse_status_line(line: &str) -> Result<u32, ClientError> {
    let malformed = || ClientError::MalformedStatusLine(line.to_string());

    let rest = line.strip_prefix("HTTP/").ok_or_else(malformed)?;
    let mut parts = rest.split_whitespace();
    let _version = parts.next().ok_or_else(malformed)?;
    let code = parts.next().ok_or_else(malformed)?;

    let digits = leading_digits(code);
    if digits.is_empty() {
        return Err(malformed());
    }
    Ok(digits.bytes().fold(0u32, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
    }))
}

/// Parses the longest leading run of decimal digits, after surrounding
/// whitespace. Yields 0 when there is none and saturates on overflow.
pub fn parse_content_length(value: &str) -> u64 {
    leading_digits(value.trim()).bytes().fold(0u64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
    })
}

fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

/// Reads the status line and headers, leaving the reader at the first body
/// byte.
///
/// Lines may end in CRLF or a bare LF. The head ends at the first empty line;
/// if the server hangs up before one arrives, whatever was read stands.
pub async fn read_head<R>(reader: &mut R) -> Result<ResponseHead, ClientError>
where
    R: AsyncBufRead + Unpin,
{
    let mut budget = MAX_HEAD_BYTES;
    let mut line = Vec::with_capacity(256);

    if !next_line(reader, &mut budget, &mut line).await? {
        return Err(ClientError::EmptyResponse);
    }
    let status = parse_status_line(trim_eol(&String::from_utf8_lossy(&line)))?;
    let mut head = ResponseHead {
        status,
        ..ResponseHead::default()
    };

    while next_line(reader, &mut budget, &mut line).await? {
        let text = String::from_utf8_lossy(&line);
        let text = trim_eol(&text);
        if text.is_empty() {
            break;
        }
        head.apply_header(text);
    }

    tracing::debug!(
        status = head.status,
        content_length = ?head.content_length,
        chunked = head.chunked,
        "Response head received"
    );
    Ok(head)
}

/// Reads one line into `line`. Returns `false` at end of stream.
async fn next_line<R>(
    reader: &mut R,
    budget: &mut usize,
    line: &mut Vec<u8>,
) -> Result<bool, ClientError>
where
    R: AsyncBufRead + Unpin,
{
    line.clear();
    let n = (&mut *reader)
        .take(*budget as u64)
        .read_until(b'\n', line)
        .await
        .map_err(ClientError::TransportRead)?;
    *budget -= n;

    if *budget == 0 && !line.ends_with(b"\n") {
        return Err(ClientError::HeadTooLarge(MAX_HEAD_BYTES));
    }
    Ok(n > 0)
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
