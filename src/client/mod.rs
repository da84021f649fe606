//! One-shot HTTP/1.0 GET client.
//!
//! The exchange runs strictly in order:
//!
//! ```text
//! URL ──► Target ──► request bytes ──► transport
//!                                          │
//!            output file ◄── body ◄── ResponseHead
//! ```
//!
//! Nothing is retried. Any non-200 status, a chunked body or a transport
//! failure ends the exchange with a [`ClientError`]; no output file is created
//! unless the head says the body can be saved.

pub mod body;
pub mod error;
pub mod request;
pub mod response;
pub mod url;

pub use body::transfer_body;
pub use error::ClientError;
pub use request::{build_request, send_request};
pub use response::{BodyFraming, ResponseHead, read_head};
pub use url::Target;

use std::path::{Path, PathBuf};

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpStream;

use crate::http::StatusCode;

/// A body that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Parses `url`, connects, and saves the body under `out_dir`.
pub async fn fetch(url: &str, out_dir: &Path) -> Result<Saved, ClientError> {
    let target = Target::parse(url)?;

    let addr = target.authority();
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ClientError::TransportConnect {
            addr: addr.clone(),
            source,
        })?;
    tracing::debug!(%addr, "Connected");

    exchange(stream, &target, out_dir).await
}

/// Runs one request/response exchange over an already open transport.
pub async fn exchange<T>(transport: T, target: &Target, out_dir: &Path) -> Result<Saved, ClientError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let mut transport = BufReader::new(transport);

    send_request(transport.get_mut(), target).await?;
    let head = read_head(&mut transport).await?;

    if head.status != u32::from(StatusCode::Ok.as_u16()) {
        return Err(ClientError::HttpError(head.status));
    }

    let framing = head.framing();
    if framing == BodyFraming::Chunked {
        return Err(ClientError::ChunkedUnsupported);
    }

    let path = out_dir.join(target.output_file_name());
    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(ClientError::Output)?;
    let bytes = transfer_body(framing, &mut transport, &mut file).await?;

    tracing::info!(path = %path.display(), bytes, "Body saved");
    Ok(Saved { path, bytes })
}
