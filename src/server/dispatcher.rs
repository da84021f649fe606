use std::path::PathBuf;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::path::{PathResolver, ServedKind};
use super::writer::ResponseWriter;
use super::ServeError;
use crate::http::Method;
use crate::http::method::UnknownMethod;

/// The two tokens the server cares about from a request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
}

/// Tokenizes the first line of `buf` on whitespace.
///
/// Anything but `GET` is `UnsupportedMethod`; fewer than two tokens is
/// `MalformedRequestLine`. The version token and headers are ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<RequestLine, ServeError> {
    let text = String::from_utf8_lossy(buf);
    let first = text.lines().next().unwrap_or_default();
    let mut tokens = first.split_whitespace();

    let method = tokens.next().ok_or(ServeError::MalformedRequestLine)?;
    let target = tokens.next().ok_or(ServeError::MalformedRequestLine)?;

    let method = method
        .parse::<Method>()
        .map_err(|UnknownMethod(token)| ServeError::UnsupportedMethod(token))?;

    Ok(RequestLine {
        method,
        target: target.to_string(),
    })
}

fn head_complete(buf: &[u8]) -> bool {
    buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.windows(2).any(|w| w == b"\n\n")
}

/// Serves one request per connection out of a root directory.
#[derive(Debug)]
pub struct RequestDispatcher {
    resolver: PathResolver,
    max_request_bytes: usize,
}

impl RequestDispatcher {
    /// `root` must be canonical.
    pub fn new(root: PathBuf, max_request_bytes: usize) -> Self {
        Self {
            resolver: PathResolver::new(root),
            max_request_bytes,
        }
    }

    /// Reads a request, answers it, and shuts the connection down.
    ///
    /// A peer that hangs up before sending anything gets no response. Every
    /// other failure short of a broken transport is answered with a 404.
    pub async fn serve<S>(&self, mut stream: S) -> anyhow::Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let request = self.read_request(&mut stream).await?;
        if request.is_empty() {
            tracing::debug!("Peer closed before sending a request");
            return Ok(());
        }

        let mut writer = ResponseWriter::new(&mut stream);
        match self.respond(&request, &mut writer).await {
            Ok(()) => {}
            Err(ServeError::Io(e)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "Request rejected");
                writer.send_not_found().await?;
            }
        }

        stream.shutdown().await?;
        Ok(())
    }

    /// Reads until the blank line ending the request head, end of stream, or
    /// the size cap. Only the first line is looked at, but draining the head
    /// keeps unread bytes from turning the close into a reset.
    async fn read_request<S>(&self, stream: &mut S) -> std::io::Result<BytesMut>
    where
        S: AsyncRead + Unpin,
    {
        let mut buffer = BytesMut::with_capacity(self.max_request_bytes.min(4096));

        while !head_complete(&buffer) && buffer.len() < self.max_request_bytes {
            let remaining = (self.max_request_bytes - buffer.len()) as u64;
            let n = (&mut *stream).take(remaining).read_buf(&mut buffer).await?;
            if n == 0 {
                break;
            }
        }

        Ok(buffer)
    }

    async fn respond<W>(
        &self,
        request: &[u8],
        writer: &mut ResponseWriter<W>,
    ) -> Result<(), ServeError>
    where
        W: AsyncWrite + Unpin,
    {
        let line = parse_request_line(request)?;
        let served = self.resolver.resolve(&line.target).await?;

        let bytes = match &served.kind {
            ServedKind::File(path) => writer.send_file(path).await?,
            ServedKind::Listing => {
                writer
                    .send_listing(&served.canonical_path, &served.requested_path)
                    .await?
            }
        };

        tracing::info!(
            method = %line.method,
            path = %line.target,
            status = 200,
            bytes,
            "Request served"
        );
        Ok(())
    }
}
