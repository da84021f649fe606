use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{ClientError, Target};
use crate::http::{CRLF, HTTP_VERSION, Method};

/// Sent on every request.
pub const USER_AGENT: &str = concat!("courier-get/", env!("CARGO_PKG_VERSION"));

/// Builds the request bytes for a target.
///
/// The `Host` header carries the bare host, never the port. There is no body.
pub fn build_request(target: &Target) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(128);

    buffer.extend_from_slice(
        format!("{} {} {}{CRLF}", Method::GET, target.path, HTTP_VERSION).as_bytes(),
    );
    buffer.extend_from_slice(format!("Host: {}{CRLF}", target.host).as_bytes());
    buffer.extend_from_slice(format!("User-Agent: {USER_AGENT}{CRLF}").as_bytes());
    buffer.extend_from_slice(CRLF.as_bytes());

    buffer
}

/// Writes the whole request to the transport.
///
/// A transport that stops accepting bytes part way through is reported as
/// `TransportWrite`.
pub async fn send_request<W>(transport: &mut W, target: &Target) -> Result<(), ClientError>
where
    W: AsyncWrite + Unpin,
{
    let request_bytes = build_request(target);
    transport
        .write_all(&request_bytes)
        .await
        .map_err(ClientError::TransportWrite)?;
    transport.flush().await.map_err(ClientError::TransportWrite)?;

    tracing::debug!(path = %target.path, bytes = request_bytes.len(), "Request sent");
    Ok(())
}
