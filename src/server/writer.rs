use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{ServeError, listing, mime};
use crate::http::{CRLF, StatusCode};

/// Body of every 404.
pub const NOT_FOUND_BODY: &str = "<html><body><h1>404 Not Found</h1></body></html>";

/// Content type of generated listings.
pub const LISTING_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Serializes a status line plus the three headers every response carries.
pub fn serialize_head(status: StatusCode, content_length: u64, content_type: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);

    buf.extend_from_slice(status.status_line().as_bytes());
    buf.extend_from_slice(format!("Content-Length: {content_length}{CRLF}").as_bytes());
    buf.extend_from_slice(format!("Content-Type: {content_type}{CRLF}").as_bytes());
    buf.extend_from_slice(format!("Connection: close{CRLF}").as_bytes());
    buf.extend_from_slice(CRLF.as_bytes());

    buf
}

/// Writes exactly one response onto a connection.
///
/// The `send_*` methods report `NotFound` only while nothing has been
/// written yet, so the caller can still answer with a 404. `Io` means bytes
/// may already be on the wire.
pub struct ResponseWriter<W> {
    stream: W,
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    pub fn new(stream: W) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> W {
        self.stream
    }

    /// Streams a regular file. Returns the number of body bytes sent.
    ///
    /// `Content-Length` is the size seen right after opening, and the body is
    /// capped at that size even if the file grows meanwhile.
    pub async fn send_file(&mut self, path: &Path) -> Result<u64, ServeError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|_| ServeError::NotFound)?;
        let len = file
            .metadata()
            .await
            .map_err(|_| ServeError::NotFound)?
            .len();

        self.write_head(StatusCode::Ok, len, mime::mime_for(path)).await?;

        let sent = tokio::io::copy(&mut file.take(len), &mut self.stream).await?;
        if sent < len {
            tracing::warn!(path = %path.display(), sent, advertised = len, "File shrank while streaming");
        }
        self.stream.flush().await?;
        Ok(sent)
    }

    /// Sends an HTML listing of `dir`, linking entries under `request_path`.
    pub async fn send_listing(&mut self, dir: &Path, request_path: &str) -> Result<u64, ServeError> {
        let entries = listing::read_entries(dir, request_path)
            .await
            .map_err(|_| ServeError::NotFound)?;
        let body = listing::render(request_path, &entries);

        self.write_head(StatusCode::Ok, body.len() as u64, LISTING_CONTENT_TYPE)
            .await?;
        self.stream.write_all(&body).await?;
        self.stream.flush().await?;
        Ok(body.len() as u64)
    }

    /// Sends the fixed 404 page.
    pub async fn send_not_found(&mut self) -> std::io::Result<()> {
        self.write_head(StatusCode::NotFound, NOT_FOUND_BODY.len() as u64, "text/html")
            .await?;
        self.stream.write_all(NOT_FOUND_BODY.as_bytes()).await?;
        self.stream.flush().await
    }

    async fn write_head(
        &mut self,
        status: StatusCode,
        content_length: u64,
        content_type: &str,
    ) -> std::io::Result<()> {
        let head = serialize_head(status, content_length, content_type);
        self.stream.write_all(&head).await
    }
}
