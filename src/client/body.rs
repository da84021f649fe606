use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::ClientError;
use super::response::BodyFraming;

/// Read size for body copies.
const BUFFER_SIZE: usize = 8192;

/// Copies the body from `reader` to `sink` according to `framing`.
///
/// With a known length no read ever asks for more than what is still owed,
/// and a server that hangs up early just leaves a shorter body. Without one
/// the copy runs to end of stream. Chunked bodies are refused before a single
/// byte is read. Returns the number of bytes written to `sink`.
pub async fn transfer_body<R, W>(
    framing: BodyFraming,
    reader: &mut R,
    sink: &mut W,
) -> Result<u64, ClientError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut limit = match framing {
        BodyFraming::Length(len) => Some(len),
        BodyFraming::Chunked => return Err(ClientError::ChunkedUnsupported),
        BodyFraming::UntilClose => None,
    };

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut copied = 0u64;

    loop {
        let to_read = match limit {
            Some(0) => break,
            Some(remaining) => remaining.min(BUFFER_SIZE as u64) as usize,
            None => BUFFER_SIZE,
        };

        let n = reader
            .read(&mut buffer[..to_read])
            .await
            .map_err(ClientError::TransportRead)?;
        if n == 0 {
            if let Some(remaining) = limit {
                tracing::debug!(copied, remaining, "Connection closed before full body");
            }
            break;
        }

        sink.write_all(&buffer[..n])
            .await
            .map_err(ClientError::Output)?;
        copied += n as u64;
        if let Some(remaining) = limit.as_mut() {
            *remaining -= n as u64;
        }
    }

    sink.flush().await.map_err(ClientError::Output)?;
    Ok(copied)
}
